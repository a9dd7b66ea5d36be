//! Error taxonomy for the analysis pipeline
//!
//! Distinguishes recoverable per-file conditions (insufficient data, parse
//! failures) from fatal ones (bad configuration, empty aggregation input,
//! embedding backend failures). Batch callers skip the recoverable kinds;
//! single-file callers propagate everything.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The unit has too little documentation to score. Batch mode excludes
    /// the unit instead of recording zeros, so aggregates stay unbiased.
    #[error("not enough documentation to score: {0}")]
    InsufficientData(String),

    /// The source text could not be structurally parsed.
    #[error("failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// Invalid configuration, caught once at load time.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Nothing to weight by when combining file results.
    #[error("cannot aggregate: {0}")]
    Aggregation(String),

    /// An embedding backend call failed. Never folded into a zero score.
    #[error("embedding service error: {0}")]
    Service(String),

    #[error("i/o error reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AnalysisError {
    /// Recoverable errors are skipped (with a log line) during a batch walk;
    /// the rest abort the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalysisError::InsufficientData(_)
                | AnalysisError::Parse { .. }
                | AnalysisError::Io { .. }
        )
    }
}
