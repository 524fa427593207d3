//! Completion — the single-prompt view of a provider.
//!
//! The router and the planner only ever need `prompt -> text`; this wraps a
//! [`Provider`] with the model and sampling settings chosen at startup.

use orgassist_core::error::ProviderError;
use orgassist_core::provider::{Provider, ProviderRequest};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct Completion {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl Completion {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.7,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One completion call. No retries.
    pub async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let mut request = ProviderRequest::prompt(&self.model, prompt);
        request.temperature = self.temperature;
        request.max_tokens = self.max_tokens;

        debug!(model = %self.model, prompt_chars = prompt.chars().count(), "Requesting completion");
        let response = self.provider.complete(request).await?;
        Ok(response.message.content)
    }
}
