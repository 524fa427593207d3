//! Built-in tool implementations for orgassist.
//!
//! Tools give the router its capabilities: search the web and the
//! encyclopedia, keep persistent notes, and do arithmetic. The registry is
//! assembled once at startup and never changes afterwards.

pub mod calculator;
pub mod duckduckgo;
pub mod notes;
pub mod search;
pub mod wikipedia;

use orgassist_core::note::NoteStore;
use orgassist_core::search::SearchBackend;
use orgassist_core::tool::ToolRegistry;
use std::sync::Arc;

pub use calculator::CalculatorTool;
pub use duckduckgo::DuckDuckGoSearch;
pub use notes::{ListNotesTool, WriteNoteTool};
pub use search::SearchTool;
pub use wikipedia::WikipediaSearch;

pub const WEB_SEARCH: &str = "duckduckgo_search";
pub const ENCYCLOPEDIA: &str = "wikipedia";
pub const WRITE_NOTE: &str = "write_note";
pub const LIST_NOTES: &str = "list_notes";
pub const CALCULATOR: &str = "calculator";

/// The search backends a registry is built over.
pub struct SearchBackends {
    pub web: Arc<dyn SearchBackend>,
    pub encyclopedia: Arc<dyn SearchBackend>,
}

impl SearchBackends {
    /// DuckDuckGo and Spanish Wikipedia sharing one HTTP client.
    pub fn online() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("orgassist/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });

        Self {
            web: Arc::new(DuckDuckGoSearch::new(client.clone())),
            encyclopedia: Arc::new(WikipediaSearch::new(client)),
        }
    }
}

/// Create the fixed tool registry: web search, encyclopedia search,
/// note append, note list and calculator.
pub fn default_registry(notes: Arc<dyn NoteStore>, search: SearchBackends) -> ToolRegistry {
    ToolRegistry::new(vec![
        Box::new(SearchTool::web(search.web)),
        Box::new(SearchTool::encyclopedia(search.encyclopedia)),
        Box::new(WriteNoteTool::new(Arc::clone(&notes))),
        Box::new(ListNotesTool::new(notes)),
        Box::new(CalculatorTool),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgassist_memory::InMemoryNoteStore;

    #[test]
    fn registry_has_the_five_tools() {
        let registry = default_registry(Arc::new(InMemoryNoteStore::new()), SearchBackends::online());
        assert_eq!(
            registry.names(),
            vec!["calculator", "duckduckgo_search", "list_notes", "wikipedia", "write_note"]
        );
    }

    #[tokio::test]
    async fn registry_dispatches_by_name() {
        let registry = default_registry(Arc::new(InMemoryNoteStore::new()), SearchBackends::online());
        let result = registry
            .execute(CALCULATOR, serde_json::json!({"expression": "2*(3+4)"}))
            .await
            .unwrap();
        assert_eq!(result.output, "14");
    }
}
