//! SearchBackend trait — web and encyclopedia lookups.
//!
//! Search results are an opaque text blob handed straight to the prompt.

use async_trait::async_trait;
use crate::error::ToolError;

#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// The backend name (e.g., "duckduckgo", "wikipedia").
    fn name(&self) -> &str;

    async fn search(&self, query: &str) -> std::result::Result<String, ToolError>;
}
