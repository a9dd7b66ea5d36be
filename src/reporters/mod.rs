//! Output reporters for analysis results
//!
//! Supports three output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON
//! - `csv` - Tabular rows (one per file plus one project row) for the
//!   dashboard and downstream analysis

mod csv;
mod json;
mod text;

use crate::error::AnalysisError;
use crate::models::{MetricSet, ProjectMetrics};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(AnalysisError::Config(format!(
                "unknown format '{s}'. Valid formats: text, json, csv"
            ))),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Render file and project metrics in the requested format.
pub fn report(
    files: &[MetricSet],
    project: &ProjectMetrics,
    format: OutputFormat,
) -> crate::error::Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render(files, project)),
        OutputFormat::Json => json::render(files, project),
        OutputFormat::Csv => Ok(csv::render(files, project)),
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use crate::models::{DocType, MetricSet, ProjectMetrics, Provenance};

    pub fn sample_files() -> Vec<MetricSet> {
        vec![
            MetricSet {
                identifier: "data/demo/add_llm.py".to_string(),
                doc_type: DocType::Llm,
                comment_density: 1.0,
                completeness: 0.7,
                conciseness: 0.9,
                accuracy: 0.4,
                overall_score: 0.75,
                line_count: 40,
            },
            MetricSet {
                identifier: "data/demo/norm_filter.py".to_string(),
                doc_type: DocType::Human,
                comment_density: 0.5,
                completeness: 0.5,
                conciseness: 1.0,
                accuracy: 0.3,
                overall_score: 0.575,
                line_count: 60,
            },
        ]
    }

    pub fn sample_project() -> ProjectMetrics {
        ProjectMetrics {
            comment_density: 0.7,
            completeness: 0.58,
            conciseness: 0.96,
            accuracy: 0.34,
            overall_score: 0.645,
            line_count: 100,
            num_files: 2,
            doc_type: Provenance::Mixed,
        }
    }
}
