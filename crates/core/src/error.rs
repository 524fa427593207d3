//! Error types for the orgassist domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each external collaborator (provider, tools, retrieval, notes) has its
//! own error enum; all of them fold into the top-level [`Error`].

use thiserror::Error;

/// The top-level error type for all orgassist operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Retrieval errors ---
    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    // --- Note store errors ---
    #[error("Note store error: {0}")]
    Notes(#[from] NoteError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error("Search backend unavailable: {0}")]
    SearchUnavailable(String),

    #[error(transparent)]
    Notes(#[from] NoteError),
}

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Index unavailable: {0}")]
    IndexUnavailable(String),

    #[error("Query embedding failed: {0}")]
    EmbeddingFailed(String),

    #[error("Corrupted index: {0}")]
    Corrupted(String),
}

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("Failed to read notes at {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to write notes at {path}: {reason}")]
    Write { path: String, reason: String },

    #[error("Malformed notes document: {0}")]
    Malformed(String),
}
