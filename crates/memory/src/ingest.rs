//! Knowledge ingest — builds the vector index from Markdown documents.
//!
//! Every `*.md` file under the knowledge directory is split into chunks,
//! each chunk is embedded through the provider, and the result is a
//! [`KnowledgeIndex`] whose chunk sources are the file paths.

use crate::chunker::TextSplitter;
use crate::index::{IndexedChunk, KnowledgeIndex};
use orgassist_core::error::RetrievalError;
use orgassist_core::provider::{EmbeddingRequest, Provider};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Chunks sent per embedding request.
const EMBED_BATCH: usize = 16;

/// Summary of one ingest run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub documents: usize,
    pub chunks: usize,
}

/// Discover Markdown files under `root`, sorted by path.
pub fn discover_documents(root: &Path) -> Vec<PathBuf> {
    if !root.exists() {
        return Vec::new();
    }
    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "md"))
        .map(|entry| entry.into_path())
        .collect();
    paths.sort();
    paths
}

/// Chunk and embed every document under `knowledge_dir`.
pub async fn build_index(
    provider: &dyn Provider,
    embed_model: &str,
    knowledge_dir: &Path,
    splitter: &TextSplitter,
) -> Result<(KnowledgeIndex, IngestReport), RetrievalError> {
    let documents = discover_documents(knowledge_dir);
    if documents.is_empty() {
        warn!(dir = %knowledge_dir.display(), "No Markdown documents found");
    }

    let mut pending: Vec<(String, String)> = Vec::new();
    for path in &documents {
        let text = std::fs::read_to_string(path).map_err(|e| {
            RetrievalError::IndexUnavailable(format!("{}: {e}", path.display()))
        })?;
        let source = path.display().to_string();
        let chunks = splitter.split(&text);
        debug!(source = %source, chunks = chunks.len(), "Document split");
        pending.extend(chunks.into_iter().map(|c| (c, source.clone())));
    }

    let mut index = KnowledgeIndex::new(embed_model);
    for batch in pending.chunks(EMBED_BATCH) {
        let inputs: Vec<String> = batch.iter().map(|(content, _)| content.clone()).collect();
        let response = provider
            .embed(EmbeddingRequest {
                model: embed_model.to_string(),
                inputs,
            })
            .await
            .map_err(|e| RetrievalError::EmbeddingFailed(e.to_string()))?;

        if response.embeddings.len() != batch.len() {
            return Err(RetrievalError::EmbeddingFailed(format!(
                "expected {} embeddings, got {}",
                batch.len(),
                response.embeddings.len()
            )));
        }

        index.chunks.extend(batch.iter().zip(response.embeddings).map(
            |((content, source), embedding)| IndexedChunk {
                content: content.clone(),
                source: source.clone(),
                embedding,
            },
        ));
    }

    let report = IngestReport {
        documents: documents.len(),
        chunks: index.len(),
    };
    info!(
        documents = report.documents,
        chunks = report.chunks,
        model = embed_model,
        "Knowledge index built"
    );
    Ok((index, report))
}
