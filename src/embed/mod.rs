//! Embedding service contracts and vector math
//!
//! The metric engine treats embedding models as black-box services: given one
//! or more text strings they return fixed-length vectors, and two vectors
//! compare by cosine similarity. Two services exist — a generic sentence
//! model for text-only comparisons (conciseness) and a code-aware model for
//! description-vs-body comparisons (accuracy). Both are shared read-only
//! across worker threads.

mod http;

pub use http::HttpEmbeddingClient;

use crate::error::Result;

/// Generic sentence-embedding service, used for text-only comparisons.
pub trait TextEmbeddingService: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text.to_string()])?;
        Ok(vectors.pop().unwrap_or_default())
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Code-aware embedding service; understands programming-language token
/// structure. The generic sentence model is too imprecise for code-vs-text
/// comparisons.
pub trait CodeEmbeddingService: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text.to_string()])?;
        Ok(vectors.pop().unwrap_or_default())
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn norm(v: &[f32]) -> f32 {
    dot_product(v, v).sqrt()
}

/// Cosine similarity in [-1, 1]; 0.0 for degenerate (zero-norm) inputs.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot = dot_product(a, b);
    let norm_a = norm(a);
    let norm_b = norm(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let v = vec![0.3, -0.5, 0.8];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_opposite_vectors_is_negative_one() {
        assert!((cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_yields_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }
}
