//! Deterministic embedding provider for tests.

use async_trait::async_trait;
use orgassist_core::error::ProviderError;
use orgassist_core::provider::*;

const DIM: usize = 64;

/// Bag-of-words embedder: each lower-cased word bumps one hashed dimension.
pub struct HashEmbedder;

impl HashEmbedder {
    pub fn vector(text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; DIM];
        for word in text.to_lowercase().split_whitespace() {
            // FNV-1a
            let mut h: u32 = 0x811c9dc5;
            for b in word.bytes() {
                h ^= b as u32;
                h = h.wrapping_mul(0x01000193);
            }
            v[h as usize % DIM] += 1.0;
        }
        v
    }
}

#[async_trait]
impl Provider for HashEmbedder {
    fn name(&self) -> &str {
        "hash"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        Err(ProviderError::NotConfigured("hash embedder has no completions".into()))
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, ProviderError> {
        Ok(EmbeddingResponse {
            embeddings: request.inputs.iter().map(|t| Self::vector(t)).collect(),
            model: request.model,
            usage: None,
        })
    }
}
