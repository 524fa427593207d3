//! Vector retriever over the persisted knowledge index.

use crate::index::KnowledgeIndex;
use crate::vector::rank_chunks;
use async_trait::async_trait;
use orgassist_core::error::RetrievalError;
use orgassist_core::provider::{EmbeddingRequest, Provider};
use orgassist_core::retrieval::{RetrievalHit, Retriever};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Embeds the query and ranks indexed chunks by cosine similarity.
///
/// The index file is read on first use and cached. When it does not exist
/// every query yields zero hits, so RAG falls through to the next rule.
pub struct VectorRetriever {
    provider: Arc<dyn Provider>,
    embed_model: String,
    index_path: PathBuf,
    index: RwLock<Option<Arc<KnowledgeIndex>>>,
}

impl VectorRetriever {
    pub fn new(
        provider: Arc<dyn Provider>,
        embed_model: impl Into<String>,
        index_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            provider,
            embed_model: embed_model.into(),
            index_path: index_path.into(),
            index: RwLock::new(None),
        }
    }

    /// Use an already-built index instead of reading one from disk.
    pub fn with_index(mut self, index: KnowledgeIndex) -> Self {
        self.index = RwLock::new(Some(Arc::new(index)));
        self
    }

    async fn loaded_index(&self) -> Result<Arc<KnowledgeIndex>, RetrievalError> {
        if let Some(index) = self.index.read().await.as_ref() {
            return Ok(Arc::clone(index));
        }

        let mut slot = self.index.write().await;
        if let Some(index) = slot.as_ref() {
            return Ok(Arc::clone(index));
        }

        let index = match KnowledgeIndex::load(&self.index_path)? {
            Some(index) => {
                if index.model != self.embed_model {
                    warn!(
                        index_model = %index.model,
                        embed_model = %self.embed_model,
                        "Knowledge index was built with a different embedding model"
                    );
                }
                index
            }
            None => {
                warn!(path = %self.index_path.display(), "Knowledge index not found; run `orgassist index`");
                KnowledgeIndex::new(&self.embed_model)
            }
        };

        let index = Arc::new(index);
        *slot = Some(Arc::clone(&index));
        Ok(index)
    }
}

#[async_trait]
impl Retriever for VectorRetriever {
    fn name(&self) -> &str {
        "vector"
    }

    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<RetrievalHit>, RetrievalError> {
        let index = self.loaded_index().await?;
        if index.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let response = self
            .provider
            .embed(EmbeddingRequest {
                model: self.embed_model.clone(),
                inputs: vec![query.to_string()],
            })
            .await
            .map_err(|e| RetrievalError::EmbeddingFailed(e.to_string()))?;

        let query_embedding = response
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| RetrievalError::EmbeddingFailed("empty embedding response".into()))?;

        let hits: Vec<RetrievalHit> = rank_chunks(&index.chunks, &query_embedding, k)
            .into_iter()
            .map(|(_, chunk)| RetrievalHit::new(chunk.content.clone(), chunk.source.clone()))
            .collect();

        debug!(k, hits = hits.len(), "Retrieved knowledge chunks");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexedChunk;
    use crate::test_helpers::HashEmbedder;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_index_yields_no_hits() {
        let dir = TempDir::new().unwrap();
        let retriever = VectorRetriever::new(
            Arc::new(HashEmbedder),
            "nomic-embed-text",
            dir.path().join("index.json"),
        );

        let hits = retriever.retrieve("política de viajes", 4).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn returns_top_k_in_rank_order() {
        let embed = |text: &str| HashEmbedder::vector(text);
        let mut index = KnowledgeIndex::new("nomic-embed-text");
        for (content, source) in [
            ("política de viajes", "viajes.md"),
            ("menú de la cafetería", "cafeteria.md"),
            ("política de vacaciones", "vacaciones.md"),
        ] {
            index.chunks.push(IndexedChunk {
                content: content.into(),
                source: source.into(),
                embedding: embed(content),
            });
        }

        let retriever = VectorRetriever::new(Arc::new(HashEmbedder), "nomic-embed-text", "unused")
            .with_index(index);

        let hits = retriever.retrieve("política de viajes", 2).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].source, "viajes.md");
    }

    #[tokio::test]
    async fn loads_index_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.json");
        let mut index = KnowledgeIndex::new("nomic-embed-text");
        index.chunks.push(IndexedChunk {
            content: "Procedimiento de reporte".into(),
            source: "reportes.md".into(),
            embedding: HashEmbedder::vector("Procedimiento de reporte"),
        });
        index.save(&path).unwrap();

        let retriever = VectorRetriever::new(Arc::new(HashEmbedder), "nomic-embed-text", &path);
        let hits = retriever.retrieve("reporte", 4).await.unwrap();
        assert_eq!(hits, vec![RetrievalHit::new("Procedimiento de reporte", "reportes.md")]);
    }
}
