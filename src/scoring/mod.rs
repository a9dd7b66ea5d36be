//! Aggregate scoring
//!
//! Combines the four per-file metrics into one weighted overall score, and
//! combines file results into a project-level result weighted by line count.
//! The weight table is validated once at construction; a table that does not
//! sum to 1.0 never produces a score.

use crate::config::Weights;
use crate::error::{AnalysisError, Result};
use crate::models::{DocType, MetricSet, ProjectMetrics, Provenance};

/// The four raw metric values of one file, before weighting.
#[derive(Debug, Clone, Copy)]
pub struct FileScores {
    pub comment_density: f64,
    pub completeness: f64,
    pub conciseness: f64,
    pub accuracy: f64,
}

#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    weights: Weights,
}

impl ScoreAggregator {
    /// Build an aggregator from a validated weight table.
    pub fn new(weights: Weights) -> Result<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Weighted overall score for a single file.
    pub fn compute_file_score(&self, scores: &FileScores) -> f64 {
        scores.comment_density * self.weights.comment_density
            + scores.completeness * self.weights.completeness
            + scores.conciseness * self.weights.conciseness
            + scores.accuracy * self.weights.accuracy
    }

    /// Aggregate file results into project-level metrics, each field a
    /// line-count-weighted average. Fails when there is nothing to weight by.
    pub fn aggregate_project(&self, file_results: &[MetricSet]) -> Result<ProjectMetrics> {
        let total_lines: usize = file_results.iter().map(|r| r.line_count).sum();
        if total_lines == 0 {
            return Err(AnalysisError::Aggregation(
                "no lines found in the project".to_string(),
            ));
        }

        let doc_type = if file_results.iter().all(|r| r.doc_type == DocType::Llm) {
            Provenance::Llm
        } else if file_results.iter().all(|r| r.doc_type == DocType::Human) {
            Provenance::Human
        } else {
            Provenance::Mixed
        };

        let weighted = |f: fn(&MetricSet) -> f64| -> f64 {
            file_results
                .iter()
                .map(|r| f(r) * r.line_count as f64)
                .sum::<f64>()
                / total_lines as f64
        };

        Ok(ProjectMetrics {
            comment_density: weighted(|r| r.comment_density),
            completeness: weighted(|r| r.completeness),
            conciseness: weighted(|r| r.conciseness),
            accuracy: weighted(|r| r.accuracy),
            overall_score: weighted(|r| r.overall_score),
            line_count: total_lines,
            num_files: file_results.len(),
            doc_type,
        })
    }
}
