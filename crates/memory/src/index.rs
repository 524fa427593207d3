//! On-disk knowledge index: embedded document chunks as one JSON document.

use orgassist_core::error::RetrievalError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One embedded chunk of a knowledge document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedChunk {
    pub content: String,
    /// Originating document path
    pub source: String,
    pub embedding: Vec<f32>,
}

/// The persisted index. `model` records which embedding model produced the
/// vectors; queries must be embedded with the same one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeIndex {
    pub model: String,
    pub chunks: Vec<IndexedChunk>,
}

impl KnowledgeIndex {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            chunks: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Load the index at `path`. A missing file is `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Self>, RetrievalError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(RetrievalError::IndexUnavailable(format!(
                    "{}: {e}",
                    path.display()
                )));
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| RetrievalError::Corrupted(format!("{}: {e}", path.display())))
    }

    /// Write the index to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), RetrievalError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| RetrievalError::IndexUnavailable(e.to_string()))?;
        }

        let content = serde_json::to_string(self)
            .map_err(|e| RetrievalError::Corrupted(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| RetrievalError::IndexUnavailable(e.to_string()))
    }
}
