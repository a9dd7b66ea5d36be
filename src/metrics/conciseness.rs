//! Docstring conciseness
//!
//! Penalizes verbose sentences and locally redundant descriptions. Redundancy
//! uses a single-pass anchor walk over the description sequence: each
//! description compares against the current anchor only, so at most N-1
//! comparisons happen — deliberately not a full pairwise scan.

use crate::config::Thresholds;
use crate::docstring::{extract_description, SentenceSegmenter};
use crate::embed::{cosine_similarity, TextEmbeddingService};
use crate::error::Result;

const VERBOSE_WEIGHT: f64 = 0.75;
const REDUNDANT_WEIGHT: f64 = 0.25;
const MIN_MAX_PENALTY: f64 = 1e-6;

/// Compute the conciseness score of a unit's docstrings.
///
/// Descriptions are the tag-free prefixes of the docstrings; empty ones are
/// dropped, and a unit with none left scores 0.0. A sentence is verbose past
/// `verbose_words` words; a description is redundant when its similarity to
/// the current anchor reaches `similarity`.
pub fn compute_conciseness(
    docstrings: &[String],
    segmenter: &dyn SentenceSegmenter,
    text_service: &dyn TextEmbeddingService,
    thresholds: &Thresholds,
) -> Result<f64> {
    if docstrings.is_empty() {
        return Ok(0.0);
    }

    let descriptions: Vec<String> = docstrings
        .iter()
        .map(|doc| extract_description(doc))
        .filter(|desc| !desc.is_empty())
        .collect();
    if descriptions.is_empty() {
        return Ok(0.0);
    }

    let mut count_sentences = 0usize;
    let mut verbose_count = 0usize;
    for desc in &descriptions {
        for sentence in segmenter.segment(desc) {
            count_sentences += 1;
            if sentence.split_whitespace().count() > thresholds.verbose_words {
                verbose_count += 1;
            }
        }
    }

    // Anchor-advance walk: compare each description against the current
    // anchor; a miss moves the anchor forward without counting.
    let mut similar_count = 0usize;
    if descriptions.len() >= 2 {
        let embeddings = text_service.embed_batch(&descriptions)?;
        let mut row = 0usize;
        for col in 1..descriptions.len() {
            count_sentences += 1;
            let similarity = cosine_similarity(&embeddings[row], &embeddings[col]) as f64;
            if similarity >= thresholds.similarity {
                similar_count += 1;
            } else {
                row = col;
            }
        }
    }

    let penalty = VERBOSE_WEIGHT * verbose_count as f64 + REDUNDANT_WEIGHT * similar_count as f64;
    let max_penalty = (count_sentences as f64 - 0.25).max(MIN_MAX_PENALTY);

    Ok((1.0 - penalty / max_penalty).max(0.0))
}
