use serde::{Deserialize, Serialize};

use crate::error::{GateError, Result};

/// A fragment of a tenant document together with its embedding, as
/// persisted by the ingestion collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub embedding: Vec<f32>,
}

/// Per-query scoring result, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub text: String,
    pub similarity: f32,
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut a_norm = 0.0f32;
    let mut b_norm = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        a_norm += x * x;
        b_norm += y * y;
    }
    if a_norm == 0.0 || b_norm == 0.0 {
        return 0.0;
    }
    dot / (a_norm.sqrt() * b_norm.sqrt())
}

/// Scores every chunk against the query embedding and sorts descending
/// by similarity. The sort is stable, so equal scores keep their input
/// order. A chunk whose embedding length differs from the query's is a
/// corrupt index entry and fails the whole ranking.
pub fn rank_chunks(query_embedding: &[f32], chunks: &[Chunk]) -> Result<Vec<ScoredChunk>> {
    let mut scored = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        if chunk.embedding.len() != query_embedding.len() {
            return Err(GateError::DimensionMismatch {
                expected: query_embedding.len(),
                actual: chunk.embedding.len(),
                index,
            });
        }
        scored.push(ScoredChunk {
            text: chunk.text.clone(),
            similarity: cosine_similarity(query_embedding, &chunk.embedding),
        });
    }
    scored.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str, embedding: Vec<f32>) -> Chunk {
        Chunk {
            text: text.to_string(),
            embedding,
        }
    }

    #[test]
    fn cosine_of_vector_with_itself_is_one() {
        let v = [0.3f32, -1.2, 4.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_with_zero_vector_is_zero() {
        let v = [1.0f32, 2.0];
        assert_eq!(cosine_similarity(&v, &[0.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &v), 0.0);
    }

    #[test]
    fn rank_orders_descending() {
        let query = [1.0f32, 0.0];
        let chunks = vec![
            chunk("orthogonal", vec![0.0, 1.0]),
            chunk("aligned", vec![2.0, 0.0]),
            chunk("opposed", vec![-1.0, 0.0]),
        ];
        let ranked = rank_chunks(&query, &chunks).unwrap();
        assert_eq!(ranked[0].text, "aligned");
        assert_eq!(ranked[1].text, "orthogonal");
        assert_eq!(ranked[2].text, "opposed");
        assert!(ranked.windows(2).all(|w| w[0].similarity >= w[1].similarity));
    }

    #[test]
    fn equal_scores_keep_input_order() {
        let query = [1.0f32, 0.0];
        let chunks = vec![
            chunk("first", vec![1.0, 0.0]),
            chunk("second", vec![3.0, 0.0]),
        ];
        let ranked = rank_chunks(&query, &chunks).unwrap();
        assert_eq!(ranked[0].text, "first");
        assert_eq!(ranked[1].text, "second");
    }

    #[test]
    fn dimension_mismatch_fails_fast() {
        let query = [1.0f32, 0.0];
        let chunks = vec![chunk("bad", vec![1.0, 0.0, 0.0])];
        let err = rank_chunks(&query, &chunks).unwrap_err();
        assert!(matches!(err, GateError::DimensionMismatch { index: 0, .. }));
    }
}
