//! Note tools — append to and list the persistent note journal.

use async_trait::async_trait;
use orgassist_core::error::ToolError;
use orgassist_core::note::{Note, NoteStore};
use orgassist_core::tool::{Tool, ToolResult};
use std::sync::Arc;

/// Output of `list_notes` when the journal is empty.
pub const NO_NOTES: &str = "No hay notas.";

/// Characters of the note echoed back in the confirmation.
const PREVIEW_CHARS: usize = 80;

pub struct WriteNoteTool {
    store: Arc<dyn NoteStore>,
}

impl WriteNoteTool {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for WriteNoteTool {
    fn name(&self) -> &str {
        crate::WRITE_NOTE
    }

    fn description(&self) -> &str {
        "Guarda una nota persistente de texto."
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let text = arguments["text"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'text' argument".into()))?;

        self.store.append(Note::new(text)).await?;

        let preview: String = text.chars().take(PREVIEW_CHARS).collect();
        Ok(ToolResult::ok(format!("Nota guardada: {preview}...")))
    }
}

pub struct ListNotesTool {
    store: Arc<dyn NoteStore>,
}

impl ListNotesTool {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for ListNotesTool {
    fn name(&self) -> &str {
        crate::LIST_NOTES
    }

    fn description(&self) -> &str {
        "Lista notas persistentes guardadas."
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let notes = self.store.list().await?;
        Ok(ToolResult::ok(format_notes(&notes)))
    }
}

/// One `- <n>. <text>` line per note, 1-based.
pub fn format_notes(notes: &[Note]) -> String {
    if notes.is_empty() {
        return NO_NOTES.to_string();
    }
    notes
        .iter()
        .enumerate()
        .map(|(i, n)| format!("- {}. {}", i + 1, n.text))
        .collect::<Vec<_>>()
        .join("\n")
}
