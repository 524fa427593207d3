//! OpenAI-compatible HTTP provider.
//!
//! The default deployment is Ollama's `/v1` endpoint; any server speaking
//! the same `/chat/completions` and `/embeddings` dialect works too.

use async_trait::async_trait;
use orgassist_core::error::ProviderError;
use orgassist_core::message::{Message, Role};
use orgassist_core::provider::*;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const DEFAULT_RETRY_AFTER_SECS: u64 = 5;

pub struct OpenAiCompatProvider {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// `base_url` includes the API version segment, e.g.
    /// `http://localhost:11434/v1`.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });

        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Ollama from its server root (`http://localhost:11434`). Ollama
    /// ignores the bearer token, so a placeholder is sent.
    pub fn ollama(root_url: &str) -> Self {
        Self::new(
            "ollama",
            format!("{}/v1", root_url.trim_end_matches('/')),
            "ollama",
        )
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// POST a JSON body and decode the JSON reply.
    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ProviderError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint(path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        let response = ensure_success(response).await?;
        response.json::<R>().await.map_err(|e| ProviderError::ApiError {
            status_code: StatusCode::OK.as_u16(),
            message: format!("malformed {path} response: {e}"),
        })
    }
}

fn transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout(e.to_string())
    } else {
        ProviderError::Network(e.to_string())
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            Err(ProviderError::RateLimited { retry_after_secs })
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(
            ProviderError::AuthenticationFailed(format!("endpoint refused credentials ({status})")),
        ),
        StatusCode::NOT_FOUND => Err(ProviderError::ModelNotFound(
            response.text().await.unwrap_or_default(),
        )),
        _ => {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "Provider returned an error status");
            Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: body,
            })
        }
    }
}

#[async_trait]
impl Provider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        debug!(provider = %self.name, model = %request.model, "Completion request");

        let body = ChatRequest::from_request(&request);
        let reply: ChatReply = self.post_json("chat/completions", &body).await?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ProviderError::ApiError {
                status_code: StatusCode::OK.as_u16(),
                message: "completion carried no choices".into(),
            })?;

        Ok(ProviderResponse {
            message: Message::assistant(content),
            usage: reply.usage.map(Into::into),
            model: reply.model,
        })
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, ProviderError> {
        debug!(
            provider = %self.name,
            model = %request.model,
            inputs = request.inputs.len(),
            "Embedding request"
        );

        let body = EmbedRequest {
            model: &request.model,
            input: &request.inputs,
            encoding_format: "float",
        };
        let mut reply: EmbedReply = self.post_json("embeddings", &body).await?;
        reply.data.sort_by_key(|d| d.index);

        Ok(EmbeddingResponse {
            embeddings: reply.data.into_iter().map(|d| d.embedding).collect(),
            model: reply.model,
            usage: reply.usage.map(Into::into),
        })
    }
}

// Wire format

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "no_stops")]
    stop: &'a [String],
}

fn no_stops(stop: &&[String]) -> bool {
    stop.is_empty()
}

impl<'a> ChatRequest<'a> {
    fn from_request(request: &'a ProviderRequest) -> Self {
        Self {
            model: &request.model,
            messages: request
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: &m.role,
                    content: &m.content,
                })
                .collect(),
            temperature: request.temperature,
            stream: false,
            max_tokens: request.max_tokens,
            stop: &request.stop,
        }
    }
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a Role,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatReply {
    model: String,
    choices: Vec<ChatChoice>,
    usage: Option<WireUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct WireUsage {
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    total_tokens: u32,
}

impl From<WireUsage> for Usage {
    fn from(u: WireUsage) -> Self {
        Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        }
    }
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
    encoding_format: &'a str,
}

#[derive(Deserialize)]
struct EmbedReply {
    data: Vec<EmbedVector>,
    model: String,
    usage: Option<WireUsage>,
}

#[derive(Deserialize)]
struct EmbedVector {
    embedding: Vec<f32>,
    #[serde(default)]
    index: usize,
}
