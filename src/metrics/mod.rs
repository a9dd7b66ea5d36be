//! Metric computation engine
//!
//! One canonical implementation of the four documentation metrics. Each
//! metric is a pure function of its inputs; the engine wires them to the
//! configured thresholds, the sentence segmenter, and the embedding services,
//! and owns the by-content docstring parse cache.

mod accuracy;
mod completeness;
mod conciseness;
mod density;

pub use accuracy::{compute_accuracy, token_overlap, AccuracyBackend};
pub use completeness::{assess_function, compute_completeness};
pub use conciseness::compute_conciseness;
pub use density::{compute_comment_density, normalize_comment_density};

use crate::config::Thresholds;
use crate::docstring::{DocstringCache, SentenceSegmenter};
use crate::embed::TextEmbeddingService;
use crate::error::Result;
use crate::models::SourceStructure;
use std::sync::Arc;

pub struct MetricEngine {
    thresholds: Thresholds,
    segmenter: Box<dyn SentenceSegmenter>,
    text_service: Arc<dyn TextEmbeddingService>,
    accuracy_backend: AccuracyBackend,
    cache: DocstringCache,
}

impl MetricEngine {
    pub fn new(
        thresholds: Thresholds,
        segmenter: Box<dyn SentenceSegmenter>,
        text_service: Arc<dyn TextEmbeddingService>,
        accuracy_backend: AccuracyBackend,
    ) -> Self {
        Self {
            thresholds,
            segmenter,
            text_service,
            accuracy_backend,
            cache: DocstringCache::new(),
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Normalized comment density of the unit's lines.
    pub fn comment_density(&self, source: &str) -> Result<f64> {
        compute_comment_density(source.lines(), &self.thresholds)
    }

    /// Mean per-function docstring completeness.
    pub fn completeness(&self, structure: &SourceStructure) -> Result<f64> {
        compute_completeness(structure, &self.cache)
    }

    /// Verbosity/redundancy score over the unit's docstrings.
    pub fn conciseness(&self, docstrings: &[String]) -> Result<f64> {
        compute_conciseness(
            docstrings,
            self.segmenter.as_ref(),
            self.text_service.as_ref(),
            &self.thresholds,
        )
    }

    /// Mean description-vs-body similarity.
    pub fn accuracy(&self, source: &str, structure: &SourceStructure) -> Result<f64> {
        compute_accuracy(source, structure, &self.accuracy_backend)
    }
}
