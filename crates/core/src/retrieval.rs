//! Retriever trait — the abstraction over the internal knowledge index.
//!
//! A retriever ranks indexed document chunks against a query and returns
//! the best `k` of them together with the document they came from.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::RetrievalError;

/// One retrieved snippet and its originating source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalHit {
    /// The chunk text
    pub content: String,

    /// Source identifier, usually the originating document path
    pub source: String,
}

impl RetrievalHit {
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source: source.into(),
        }
    }
}

/// The core Retriever trait.
///
/// Implementations: vector index over embedded Markdown chunks.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// The backend name (e.g., "vector").
    fn name(&self) -> &str;

    /// Return up to `k` hits ranked best-first. An empty result is not an error.
    async fn retrieve(&self, query: &str, k: usize) -> std::result::Result<Vec<RetrievalHit>, RetrievalError>;
}
