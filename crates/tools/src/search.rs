//! Search tool — exposes a [`SearchBackend`] through the tool registry.

use async_trait::async_trait;
use orgassist_core::error::ToolError;
use orgassist_core::search::SearchBackend;
use orgassist_core::tool::{Tool, ToolResult};
use std::sync::Arc;
use tracing::debug;

/// A named tool whose only job is to forward a query to a search backend
/// and return the backend's text blob.
pub struct SearchTool {
    name: &'static str,
    description: &'static str,
    backend: Arc<dyn SearchBackend>,
}

impl SearchTool {
    /// The `duckduckgo_search` tool.
    pub fn web(backend: Arc<dyn SearchBackend>) -> Self {
        Self {
            name: crate::WEB_SEARCH,
            description: "Busca información actual en la web con DuckDuckGo.",
            backend,
        }
    }

    /// The `wikipedia` tool.
    pub fn encyclopedia(backend: Arc<dyn SearchBackend>) -> Self {
        Self {
            name: crate::ENCYCLOPEDIA,
            description: "Consulta rápida en Wikipedia (español).",
            backend,
        }
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let query = arguments["query"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'query' argument".into()))?;

        debug!(tool = self.name, backend = self.backend.name(), "Searching");
        let output = self.backend.search(query).await?;
        Ok(ToolResult::ok(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedBackend;

    #[async_trait]
    impl SearchBackend for CannedBackend {
        fn name(&self) -> &str {
            "canned"
        }

        async fn search(&self, query: &str) -> Result<String, ToolError> {
            if query == "falla" {
                return Err(ToolError::SearchUnavailable("sin conexión".into()));
            }
            Ok(format!("resultados para {query}"))
        }
    }

    #[tokio::test]
    async fn forwards_query() {
        let tool = SearchTool::web(Arc::new(CannedBackend));
        assert_eq!(tool.name(), "duckduckgo_search");

        let result = tool
            .execute(serde_json::json!({"query": "qué es Rust"}))
            .await
            .unwrap();
        assert_eq!(result.output, "resultados para qué es Rust");
    }

    #[tokio::test]
    async fn backend_failure_propagates() {
        let tool = SearchTool::encyclopedia(Arc::new(CannedBackend));
        assert_eq!(tool.name(), "wikipedia");

        let err = tool
            .execute(serde_json::json!({"query": "falla"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::SearchUnavailable(_)));
    }
}
