//! Semantic accuracy
//!
//! Pairs each function's free-text description with its cleaned body and
//! measures how well they correspond. The primary backend embeds both sides
//! with a code-aware model and takes cosine similarity; the overlap backend
//! is an offline fallback using identifier-token overlap.

use crate::docstring::extract_description;
use crate::embed::{cosine_similarity, CodeEmbeddingService};
use crate::error::Result;
use crate::models::SourceStructure;
use crate::parsers::python::cleaned_body;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\b\w+\b").expect("static regex");
}

/// How description/code correspondence is scored.
#[derive(Clone)]
pub enum AccuracyBackend {
    /// Code-aware embedding model; similarity is cosine over embeddings.
    Embedding(Arc<dyn CodeEmbeddingService>),
    /// Share of code identifier tokens that also occur in the description.
    TokenOverlap,
}

impl std::fmt::Debug for AccuracyBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccuracyBackend::Embedding(_) => write!(f, "Embedding"),
            AccuracyBackend::TokenOverlap => write!(f, "TokenOverlap"),
        }
    }
}

/// Token-overlap relevance: the ratio of code tokens that appear in the
/// description, in [0, 1].
pub fn token_overlap(description: &str, code: &str) -> f64 {
    let code_tokens: HashSet<&str> = WORD.find_iter(code).map(|m| m.as_str()).collect();
    if code_tokens.is_empty() {
        return 0.0;
    }
    let description_tokens: HashSet<&str> =
        WORD.find_iter(description).map(|m| m.as_str()).collect();
    let overlap = code_tokens.intersection(&description_tokens).count();
    overlap as f64 / code_tokens.len() as f64
}

/// Mean description-vs-body similarity across the unit's functions.
///
/// Pairs where either side is shorter than 3 characters after trimming are
/// skipped; with no surviving pairs the score is 0.0.
pub fn compute_accuracy(
    source: &str,
    structure: &SourceStructure,
    backend: &AccuracyBackend,
) -> Result<f64> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for func in &structure.functions {
        let description = extract_description(func.docstring.as_deref().unwrap_or(""));
        let description = description.trim();
        let body = cleaned_body(source, &structure.functions, func);
        let body = body.trim();
        if description.len() < 3 || body.len() < 3 {
            continue;
        }
        pairs.push((description.to_string(), body.to_string()));
    }

    if pairs.is_empty() {
        return Ok(0.0);
    }

    let scores: Vec<f64> = match backend {
        AccuracyBackend::Embedding(service) => {
            let descriptions: Vec<String> = pairs.iter().map(|(d, _)| d.clone()).collect();
            let bodies: Vec<String> = pairs.iter().map(|(_, c)| c.clone()).collect();
            let description_vecs = service.embed_batch(&descriptions)?;
            let body_vecs = service.embed_batch(&bodies)?;
            description_vecs
                .iter()
                .zip(body_vecs.iter())
                .map(|(d, c)| cosine_similarity(d, c) as f64)
                .collect()
        }
        AccuracyBackend::TokenOverlap => pairs
            .iter()
            .map(|(description, code)| token_overlap(description, code))
            .collect(),
    };

    Ok(scores.iter().sum::<f64>() / scores.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::python::parse_source;
    use std::path::PathBuf;

    struct UniformEmbedding(Vec<f32>);

    impl CodeEmbeddingService for UniformEmbedding {
        fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| self.0.clone()).collect())
        }
    }

    #[test]
    fn overlap_counts_shared_identifiers() {
        let score = token_overlap("Check if x is positive", "if x > 0:");
        // code tokens {if, x, 0}; shared {if, x}.
        assert!((score - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn overlap_with_no_shared_tokens_is_zero() {
        assert_eq!(token_overlap("unrelated words entirely", "y = z + 1"), 0.0);
    }

    #[test]
    fn overlap_of_empty_code_is_zero() {
        assert_eq!(token_overlap("anything", "!!!"), 0.0);
    }

    #[test]
    fn embedding_backend_averages_pair_similarities() {
        let source = r#"def scale(values, factor):
    """Multiply every value by the factor."""
    return [v * factor for v in values]
"#;
        let structure = parse_source(source, &PathBuf::from("t.py")).unwrap();
        let backend = AccuracyBackend::Embedding(Arc::new(UniformEmbedding(vec![1.0, 2.0])));
        let score = compute_accuracy(source, &structure, &backend).unwrap();
        // Identical embeddings on both sides: similarity 1.0.
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn functions_without_descriptions_are_skipped() {
        let source = "def f(x):\n    return x + 1\n";
        let structure = parse_source(source, &PathBuf::from("t.py")).unwrap();
        let score = compute_accuracy(source, &structure, &AccuracyBackend::TokenOverlap).unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn nested_function_code_is_not_scored_against_parent() {
        let source = r#"def outer(data):
    """Filter the data rows."""
    def helper(row):
        return row.strip()
    return [helper(r) for r in data]
"#;
        let structure = parse_source(source, &PathBuf::from("t.py")).unwrap();
        // The helper body must not appear in outer's cleaned body.
        let outer = &structure.functions[0];
        let body = cleaned_body(source, &structure.functions, outer);
        assert!(!body.contains("strip"));
        let score = compute_accuracy(source, &structure, &AccuracyBackend::TokenOverlap).unwrap();
        assert!(score > 0.0);
    }

    #[test]
    fn overlap_backend_scores_relevant_doc_higher() {
        let relevant = r#"def total(values):
    """Sum the values in the list."""
    return sum(values)
"#;
        let unrelated = r#"def total(values):
    """Render the dashboard template."""
    return sum(values)
"#;
        let score = |src: &str| {
            let structure = parse_source(src, &PathBuf::from("t.py")).unwrap();
            compute_accuracy(src, &structure, &AccuracyBackend::TokenOverlap).unwrap()
        };
        assert!(score(relevant) > score(unrelated));
    }
}
