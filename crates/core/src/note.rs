//! NoteStore trait — the durable, append-only note journal.
//!
//! Notes are only ever appended and listed; there is no edit or delete.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::NoteError;

/// A single saved note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
}

impl Note {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// The core NoteStore trait.
///
/// Implementations: JSON document on disk, in-memory (for testing).
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// The backend name (e.g., "json_file", "in_memory").
    fn name(&self) -> &str;

    /// Append a note at the end of the journal.
    async fn append(&self, note: Note) -> std::result::Result<(), NoteError>;

    /// All notes, oldest first.
    async fn list(&self) -> std::result::Result<Vec<Note>, NoteError>;
}
