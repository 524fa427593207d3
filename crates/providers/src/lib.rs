//! LLM Provider implementations for orgassist.
//!
//! All providers implement the `orgassist_core::Provider` trait.

pub mod openai_compat;

use std::sync::Arc;
use orgassist_config::ProviderConfig;
use orgassist_core::provider::Provider;

pub use openai_compat::OpenAiCompatProvider;

/// Build the provider described by the configuration.
///
/// The configured base URL is the Ollama server root; an API key, when
/// present, turns it into a plain bearer-authenticated OpenAI-compatible
/// endpoint.
pub fn build_from_config(config: &ProviderConfig) -> Arc<dyn Provider> {
    let provider = OpenAiCompatProvider::ollama(&config.base_url);
    match &config.api_key {
        Some(key) => Arc::new(provider.with_api_key(key)),
        None => Arc::new(provider),
    }
}
