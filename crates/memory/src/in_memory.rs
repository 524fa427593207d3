//! In-memory note store — useful for testing and ephemeral sessions.

use async_trait::async_trait;
use orgassist_core::error::NoteError;
use orgassist_core::note::{Note, NoteStore};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A note store that keeps notes in a Vec.
/// Useful for testing and sessions where persistence isn't needed.
pub struct InMemoryNoteStore {
    notes: Arc<RwLock<Vec<Note>>>,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self {
            notes: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryNoteStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NoteStore for InMemoryNoteStore {
    fn name(&self) -> &str { "in_memory" }

    async fn append(&self, note: Note) -> Result<(), NoteError> {
        self.notes.write().await.push(note);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Note>, NoteError> {
        Ok(self.notes.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn append_and_list() {
        let store = InMemoryNoteStore::new();
        assert!(store.list().await.unwrap().is_empty());

        store.append(Note::new("primera")).await.unwrap();
        store.append(Note::new("segunda")).await.unwrap();

        let notes = store.list().await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].text, "primera");
    }
}
