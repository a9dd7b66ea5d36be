//! docuscore - Documentation quality metrics
//!
//! Scores how well source-code comments and docstrings document their
//! associated code, producing per-file and per-project quality metrics
//! (comment density, completeness, conciseness, semantic accuracy) for
//! display and export. Built for comparing human-written and LLM-generated
//! documentation.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod docstring;
pub mod embed;
pub mod error;
pub mod metrics;
pub mod models;
pub mod parsers;
pub mod reporters;
pub mod scoring;

pub use analyzer::{Analyzer, BatchResult};
pub use error::{AnalysisError, Result};
pub use models::{DocType, MetricSet, ProjectMetrics, Provenance};
pub use scoring::{FileScores, ScoreAggregator};
