//! Vector similarity utilities.
//!
//! Pure-Rust cosine similarity and top-k ranking over indexed chunks.

use crate::index::IndexedChunk;

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where 1 = identical, 0 = orthogonal, -1 = opposite.
/// Returns 0.0 if the lengths differ or either vector is empty or zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a, norm_b) = a.iter().zip(b).fold((0.0f64, 0.0f64, 0.0f64), |acc, (x, y)| {
        let (x, y) = (*x as f64, *y as f64);
        (acc.0 + x * y, acc.1 + x * x, acc.2 + y * y)
    });

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < 1e-10 {
        return 0.0;
    }

    (dot / denom) as f32
}

/// Rank chunks by cosine similarity to a query embedding, best first.
///
/// Ties keep index order, so ranking is deterministic for a fixed index.
pub fn rank_chunks<'a>(
    chunks: &'a [IndexedChunk],
    query_embedding: &[f32],
    limit: usize,
) -> Vec<(f32, &'a IndexedChunk)> {
    let mut scored: Vec<(f32, &IndexedChunk)> = chunks
        .iter()
        .map(|chunk| (cosine_similarity(&chunk.embedding, query_embedding), chunk))
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(source: &str, embedding: Vec<f32>) -> IndexedChunk {
        IndexedChunk {
            content: format!("contenido de {source}"),
            source: source.into(),
            embedding,
        }
    }

    #[test]
    fn identical_vectors_score_one() {
        let v = vec![0.3, 0.4, 0.5];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn orthogonal_vectors_score_zero() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    }

    #[test]
    fn mismatched_or_empty_vectors_score_zero() {
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn ranking_is_best_first_and_truncated() {
        let chunks = vec![
            chunk("a.md", vec![0.0, 1.0]),
            chunk("b.md", vec![1.0, 0.0]),
            chunk("c.md", vec![0.7, 0.7]),
        ];

        let ranked = rank_chunks(&chunks, &[1.0, 0.1], 2);
        let sources: Vec<&str> = ranked.iter().map(|(_, c)| c.source.as_str()).collect();
        assert_eq!(sources, vec!["b.md", "c.md"]);
    }
}
