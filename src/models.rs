//! Core data models for docuscore
//!
//! These models represent the analysis results exchanged between the metric
//! engine, the aggregator, and the reporters.

use serde::{Deserialize, Serialize};

/// Provenance label for a unit's documentation, derived from its file path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocType {
    Llm,
    Human,
}

impl DocType {
    /// Path heuristic: anything with `llm` in the lowercased path is treated
    /// as LLM-documented.
    pub fn from_identifier(identifier: &str) -> Self {
        if identifier.to_lowercase().contains("llm") {
            DocType::Llm
        } else {
            DocType::Human
        }
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocType::Llm => write!(f, "LLM"),
            DocType::Human => write!(f, "Human"),
        }
    }
}

/// Provenance of a whole project: uniform or mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    #[serde(rename = "LLM")]
    Llm,
    Human,
    Mixed,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provenance::Llm => write!(f, "LLM"),
            Provenance::Human => write!(f, "Human"),
            Provenance::Mixed => write!(f, "Mixed"),
        }
    }
}

/// Per-file metric result. All five scores are present together or the set is
/// not produced at all; a file without enough documentation yields no
/// MetricSet rather than one full of zeros.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSet {
    pub identifier: String,
    pub doc_type: DocType,
    pub comment_density: f64,
    pub completeness: f64,
    pub conciseness: f64,
    pub accuracy: f64,
    pub overall_score: f64,
    /// Non-blank line count; the weight used during project aggregation.
    pub line_count: usize,
}

/// Line-count-weighted aggregate over a set of files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetrics {
    pub comment_density: f64,
    pub completeness: f64,
    pub conciseness: f64,
    pub accuracy: f64,
    pub overall_score: f64,
    pub line_count: usize,
    pub num_files: usize,
    pub doc_type: Provenance,
}

/// One function definition found by the structural walk.
///
/// Body spans are half-open `[start, end)` 0-based line ranges resolved by the
/// indentation rule, not the AST extent: the body runs until the first line
/// whose indentation falls back to the `def` line's level.
#[derive(Debug, Clone)]
pub struct FunctionRecord {
    pub name: String,
    /// Positional parameter names, with implicit `self`/`cls` receivers
    /// already dropped.
    pub params: Vec<String>,
    pub has_return_annotation: bool,
    pub body_start: usize,
    pub body_end: usize,
    pub docstring: Option<String>,
    /// Physical lines occupied by the docstring literal, if any.
    pub docstring_lines: Option<(usize, usize)>,
}

impl FunctionRecord {
    /// Whether `line` (0-based) falls inside this function's span.
    pub fn contains_line(&self, line: usize) -> bool {
        self.body_start <= line && line < self.body_end
    }
}

/// Result of the structural parse of one source unit.
#[derive(Debug, Clone, Default)]
pub struct SourceStructure {
    /// Docstrings of module, classes, and functions in source order.
    pub docstrings: Vec<String>,
    /// Every function definition found by the walk, nested ones included.
    pub functions: Vec<FunctionRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_type_from_identifier() {
        assert_eq!(
            DocType::from_identifier("data/demo/add_llm.py"),
            DocType::Llm
        );
        assert_eq!(
            DocType::from_identifier("data/demo/norm_filter.py"),
            DocType::Human
        );
        assert_eq!(DocType::from_identifier("SKLEARN_LLM.PY"), DocType::Llm);
    }

    #[test]
    fn function_record_contains_line() {
        let rec = FunctionRecord {
            name: "f".to_string(),
            params: vec![],
            has_return_annotation: false,
            body_start: 3,
            body_end: 7,
            docstring: None,
            docstring_lines: None,
        };
        assert!(!rec.contains_line(2));
        assert!(rec.contains_line(3));
        assert!(rec.contains_line(6));
        assert!(!rec.contains_line(7));
    }
}
