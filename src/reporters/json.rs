//! JSON reporter

use crate::error::{AnalysisError, Result};
use crate::models::{MetricSet, ProjectMetrics};
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    files: &'a [MetricSet],
    project: &'a ProjectMetrics,
}

pub fn render(files: &[MetricSet], project: &ProjectMetrics) -> Result<String> {
    serde_json::to_string_pretty(&JsonReport { files, project })
        .map_err(|e| AnalysisError::Config(format!("failed to serialize report: {e}")))
}
