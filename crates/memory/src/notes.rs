//! File-based note store: a single pretty-printed JSON document.
//!
//! Layout: `{"notes": [{"text": "..."}, ...]}`, UTF-8, non-ASCII kept
//! verbatim. Every append reads the whole document, pushes one note and
//! rewrites it.
//!
//! Appends inside one process are serialized by a mutex. Two processes
//! writing the same file can still lose an update; there is no file lock.

use async_trait::async_trait;
use orgassist_core::error::NoteError;
use orgassist_core::note::{Note, NoteStore};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Default, Serialize, Deserialize)]
struct NotesDocument {
    notes: Vec<Note>,
}

/// A note journal persisted as one JSON document.
pub struct JsonNoteStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonNoteStore {
    /// Open the store at `path`, creating the parent directory and an empty
    /// document if they do not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, NoteError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| write_error(&path, e))?;
        }

        if !path.exists() {
            let empty = render(&NotesDocument::default())?;
            std::fs::write(&path, empty).map_err(|e| write_error(&path, e))?;
        }

        debug!(path = %path.display(), "Note store opened");
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<NotesDocument, NoteError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| NoteError::Read {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;

        serde_json::from_str(&content).map_err(|e| NoteError::Malformed(e.to_string()))
    }

    async fn write_document(&self, doc: &NotesDocument) -> Result<(), NoteError> {
        let content = render(doc)?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| write_error(&self.path, e))
    }
}

fn render(doc: &NotesDocument) -> Result<String, NoteError> {
    serde_json::to_string_pretty(doc).map_err(|e| NoteError::Malformed(e.to_string()))
}

fn write_error(path: &Path, e: std::io::Error) -> NoteError {
    NoteError::Write {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

#[async_trait]
impl NoteStore for JsonNoteStore {
    fn name(&self) -> &str {
        "json_file"
    }

    async fn append(&self, note: Note) -> Result<(), NoteError> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.read_document().await?;
        doc.notes.push(note);
        self.write_document(&doc).await?;
        debug!(count = doc.notes.len(), "Note appended");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Note>, NoteError> {
        Ok(self.read_document().await?.notes)
    }
}
