//! Wikipedia search backend (Spanish edition).
//!
//! One MediaWiki API call: a full-text search generator limited to three
//! pages, with plain-text intro extracts. Each page renders as
//! `Page: <title>\nSummary: <extract>`; pages are separated by a blank line.

use async_trait::async_trait;
use orgassist_core::error::ToolError;
use orgassist_core::search::SearchBackend;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_ENDPOINT: &str = "https://es.wikipedia.org/w/api.php";

pub const NO_RESULT: &str = "No good Wikipedia Search Result was found";

const TOP_K_RESULTS: usize = 3;

/// Cap on the whole rendered blob, in characters.
const MAX_CHARS: usize = 4000;

pub struct WikipediaSearch {
    endpoint: String,
    client: reqwest::Client,
}

impl WikipediaSearch {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_endpoint(client, DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }
}

#[async_trait]
impl SearchBackend for WikipediaSearch {
    fn name(&self) -> &str {
        "wikipedia"
    }

    async fn search(&self, query: &str) -> Result<String, ToolError> {
        let limit = TOP_K_RESULTS.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("generator", "search"),
                ("gsrsearch", query),
                ("gsrlimit", limit.as_str()),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
            ])
            .send()
            .await
            .map_err(|e| ToolError::SearchUnavailable(format!("Wikipedia: {e}")))?;

        if !response.status().is_success() {
            return Err(ToolError::SearchUnavailable(format!(
                "Wikipedia returned {}",
                response.status()
            )));
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| ToolError::SearchUnavailable(format!("Wikipedia: {e}")))?;

        let text = body.render();
        debug!(chars = text.len(), "Wikipedia answered");
        Ok(text)
    }
}

#[derive(Debug, Default, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    query: Option<QueryPages>,
}

#[derive(Debug, Default, Deserialize)]
struct QueryPages {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    extract: String,
    /// Search rank of the page (1 = best)
    #[serde(default)]
    index: u32,
}

impl QueryResponse {
    fn render(self) -> String {
        let mut pages = self.query.map(|q| q.pages).unwrap_or_default();
        pages.sort_by_key(|p| p.index);

        let summaries: Vec<String> = pages
            .into_iter()
            .filter(|p| !p.extract.trim().is_empty())
            .take(TOP_K_RESULTS)
            .map(|p| format!("Page: {}\nSummary: {}", p.title, p.extract.trim()))
            .collect();

        if summaries.is_empty() {
            return NO_RESULT.to_string();
        }
        summaries.join("\n\n").chars().take(MAX_CHARS).collect()
    }
}
