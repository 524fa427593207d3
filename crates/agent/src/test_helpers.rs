//! Shared fakes for router and planner tests.

use async_trait::async_trait;
use orgassist_core::error::{NoteError, ProviderError, RetrievalError, ToolError};
use orgassist_core::message::Message;
use orgassist_core::note::{Note, NoteStore};
use orgassist_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use orgassist_core::retrieval::{RetrievalHit, Retriever};
use orgassist_core::search::SearchBackend;
use std::sync::Mutex;

/// A provider that returns scripted completions in order and records every
/// prompt it receives.
///
/// Panics if more calls are made than responses provided.
pub struct ScriptedProvider {
    responses: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let prompt = request
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let mut prompts = self.prompts.lock().unwrap();
        let call = prompts.len();
        prompts.push(prompt);

        let responses = self.responses.lock().unwrap();
        let text = responses.get(call).unwrap_or_else(|| {
            panic!(
                "ScriptedProvider: no more responses (call #{}, have {})",
                call,
                responses.len()
            )
        });

        Ok(ProviderResponse {
            message: Message::assistant(text.as_str()),
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
            model: request.model,
        })
    }
}

/// A provider whose every call fails.
pub struct FailingProvider;

#[async_trait]
impl Provider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        Err(ProviderError::Network("connection refused".into()))
    }
}

/// A retriever returning a fixed hit list (truncated to `k`).
pub struct FixedRetriever {
    hits: Vec<RetrievalHit>,
    queries: Mutex<Vec<(String, usize)>>,
}

impl FixedRetriever {
    pub fn new(hits: Vec<RetrievalHit>) -> Self {
        Self {
            hits,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Retriever for FixedRetriever {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<RetrievalHit>, RetrievalError> {
        self.queries.lock().unwrap().push((query.to_string(), k));
        Ok(self.hits.iter().take(k).cloned().collect())
    }
}

pub struct FailingRetriever;

#[async_trait]
impl Retriever for FailingRetriever {
    fn name(&self) -> &str {
        "failing"
    }

    async fn retrieve(&self, _query: &str, _k: usize) -> Result<Vec<RetrievalHit>, RetrievalError> {
        Err(RetrievalError::IndexUnavailable("disk on fire".into()))
    }
}

/// A search backend answering every query with the same text.
pub struct CannedSearch(pub &'static str);

#[async_trait]
impl SearchBackend for CannedSearch {
    fn name(&self) -> &str {
        "canned"
    }

    async fn search(&self, _query: &str) -> Result<String, ToolError> {
        Ok(self.0.to_string())
    }
}

/// A search backend that is always offline.
pub struct FailingSearch;

#[async_trait]
impl SearchBackend for FailingSearch {
    fn name(&self) -> &str {
        "offline"
    }

    async fn search(&self, _query: &str) -> Result<String, ToolError> {
        Err(ToolError::SearchUnavailable("sin conexión".into()))
    }
}

/// A note store whose backing file can be neither read nor written.
pub struct FailingNoteStore;

#[async_trait]
impl NoteStore for FailingNoteStore {
    fn name(&self) -> &str {
        "failing"
    }

    async fn append(&self, _note: Note) -> Result<(), NoteError> {
        Err(NoteError::Write {
            path: "storage/notes.json".into(),
            reason: "permission denied".into(),
        })
    }

    async fn list(&self) -> Result<Vec<Note>, NoteError> {
        Err(NoteError::Malformed("expected a JSON array".into()))
    }
}
