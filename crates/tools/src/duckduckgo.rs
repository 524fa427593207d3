//! DuckDuckGo search backend (Instant Answer API).
//!
//! Calls `https://api.duckduckgo.com/?q=<query>&format=json&no_html=1` and
//! flattens the answer, abstract, definition and related-topic snippets
//! into one space-joined text blob.

use async_trait::async_trait;
use orgassist_core::error::ToolError;
use orgassist_core::search::SearchBackend;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_ENDPOINT: &str = "https://api.duckduckgo.com/";

/// Output when the response carries no usable text.
pub const NO_RESULT: &str = "No good DuckDuckGo Search Result was found";

/// Related-topic snippets kept per query.
const MAX_TOPICS: usize = 5;

pub struct DuckDuckGoSearch {
    endpoint: String,
    client: reqwest::Client,
}

impl DuckDuckGoSearch {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_endpoint(client, DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }
}

#[async_trait]
impl SearchBackend for DuckDuckGoSearch {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn search(&self, query: &str) -> Result<String, ToolError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .map_err(|e| ToolError::SearchUnavailable(format!("DuckDuckGo: {e}")))?;

        if !response.status().is_success() {
            return Err(ToolError::SearchUnavailable(format!(
                "DuckDuckGo returned {}",
                response.status()
            )));
        }

        let answer: InstantAnswer = response
            .json()
            .await
            .map_err(|e| ToolError::SearchUnavailable(format!("DuckDuckGo: {e}")))?;

        let text = answer.flatten();
        debug!(chars = text.len(), "DuckDuckGo answered");
        Ok(text)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct InstantAnswer {
    answer: String,
    abstract_text: String,
    definition: String,
    related_topics: Vec<RelatedTopic>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RelatedTopic {
    Topic {
        #[serde(rename = "Text")]
        text: String,
    },
    Group {
        #[serde(rename = "Topics")]
        topics: Vec<RelatedTopic>,
    },
}

impl RelatedTopic {
    fn collect_texts<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            RelatedTopic::Topic { text } => out.push(text),
            RelatedTopic::Group { topics } => {
                for t in topics {
                    t.collect_texts(out);
                }
            }
        }
    }
}

impl InstantAnswer {
    fn flatten(&self) -> String {
        let mut parts: Vec<&str> = [&self.answer, &self.abstract_text, &self.definition]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();

        let mut topics = Vec::new();
        for topic in &self.related_topics {
            topic.collect_texts(&mut topics);
        }
        parts.extend(
            topics
                .into_iter()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .take(MAX_TOPICS),
        );

        if parts.is_empty() {
            NO_RESULT.to_string()
        } else {
            parts.join(" ")
        }
    }
}
