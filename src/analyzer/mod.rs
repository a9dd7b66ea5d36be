//! Analysis pipeline
//!
//! Orchestrates the per-file pipeline (structure extraction → metric
//! computation → weighted score) and the batch directory walk. Files are
//! independent, so the batch fans out across a rayon pool; per-file errors in
//! batch mode are logged and skipped, while single-file analysis propagates
//! them to the caller.

use crate::config::{AccuracyBackendKind, Config};
use crate::docstring::RuleSegmenter;
use crate::embed::{HttpEmbeddingClient, TextEmbeddingService};
use crate::error::{AnalysisError, Result};
use crate::metrics::{AccuracyBackend, MetricEngine};
use crate::models::{DocType, MetricSet};
use crate::parsers::{self, python};
use crate::scoring::{FileScores, ScoreAggregator};
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outcome of a batch walk: scored files plus skip/error counts for the
/// summary line.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub files: Vec<MetricSet>,
    /// Units excluded for having too little documentation.
    pub skipped: usize,
    /// Units excluded by parse or read failures.
    pub failed: usize,
}

pub struct Analyzer {
    engine: MetricEngine,
    aggregator: ScoreAggregator,
}

impl Analyzer {
    /// Build an analyzer with explicit services; the common entry point for
    /// tests and embedding callers.
    pub fn new(
        config: &Config,
        text_service: Arc<dyn TextEmbeddingService>,
        accuracy_backend: AccuracyBackend,
    ) -> Result<Self> {
        config.validate()?;
        let engine = MetricEngine::new(
            config.thresholds.clone(),
            Box::new(RuleSegmenter),
            text_service,
            accuracy_backend,
        );
        let aggregator = ScoreAggregator::new(config.weights.clone())?;
        Ok(Self { engine, aggregator })
    }

    /// Build an analyzer wired to the configured embedding endpoints. With
    /// the overlap backend only the text endpoint is contacted (and only when
    /// a unit has two or more descriptions).
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.embeddings.timeout_secs);
        let text_service: Arc<dyn TextEmbeddingService> = Arc::new(HttpEmbeddingClient::new(
            config.embeddings.text_endpoint.clone(),
            timeout,
        ));
        let accuracy_backend = match config.embeddings.backend {
            AccuracyBackendKind::Embedding => AccuracyBackend::Embedding(Arc::new(
                HttpEmbeddingClient::new(config.embeddings.code_endpoint.clone(), timeout),
            )),
            AccuracyBackendKind::Overlap => AccuracyBackend::TokenOverlap,
        };
        Self::new(config, text_service, accuracy_backend)
    }

    pub fn aggregator(&self) -> &ScoreAggregator {
        &self.aggregator
    }

    /// Analyze one source unit.
    ///
    /// Returns `Ok(None)` when the unit has too little documentation to be
    /// scored — an empty file, too few inline comments or docstrings, or no
    /// scoreable lines/functions. That is deliberately not a zero score.
    pub fn analyze_source(&self, source: &str, identifier: &str) -> Result<Option<MetricSet>> {
        if source.trim().is_empty() {
            return Ok(None);
        }

        let structure = python::parse_source(source, Path::new(identifier))?;

        let inline_comments = parsers::count_inline_comments(source);
        let thresholds = self.engine.thresholds();
        if inline_comments < thresholds.min_inline_comments
            || structure.docstrings.len() < thresholds.min_docstrings
        {
            debug!(
                identifier,
                inline_comments,
                docstrings = structure.docstrings.len(),
                "not enough documentation, skipping"
            );
            return Ok(None);
        }

        let comment_density = match self.engine.comment_density(source) {
            Ok(value) => value,
            Err(AnalysisError::InsufficientData(reason)) => {
                debug!(identifier, %reason, "skipping");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        let completeness = match self.engine.completeness(&structure) {
            Ok(value) => value,
            Err(AnalysisError::InsufficientData(reason)) => {
                debug!(identifier, %reason, "skipping");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        let conciseness = self.engine.conciseness(&structure.docstrings)?;
        let accuracy = self.engine.accuracy(source, &structure)?;

        let overall_score = self.aggregator.compute_file_score(&FileScores {
            comment_density,
            completeness,
            conciseness,
            accuracy,
        });

        Ok(Some(MetricSet {
            identifier: identifier.to_string(),
            doc_type: DocType::from_identifier(identifier),
            comment_density,
            completeness,
            conciseness,
            accuracy,
            overall_score,
            line_count: parsers::non_blank_line_count(source),
        }))
    }

    /// Analyze one file on disk. Read and parse failures propagate; the
    /// caller asked about this specific file.
    pub fn analyze_file(&self, path: &Path) -> Result<Option<MetricSet>> {
        let source = std::fs::read_to_string(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        // Files exported from Windows editors may carry a BOM.
        let source = source.trim_start_matches('\u{feff}');
        self.analyze_source(source, &trim_identifier(path))
    }

    /// Analyze every supported file under `dir`, `workers` files at a time.
    /// Per-file failures are logged and excluded; they never abort the walk.
    pub fn analyze_directory(&self, dir: &Path, workers: usize) -> Result<BatchResult> {
        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in WalkBuilder::new(dir).build() {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file() && parsers::is_supported(path) {
                        paths.push(path.to_path_buf());
                    }
                }
                Err(e) => warn!("walk error under {}: {e}", dir.display()),
            }
        }
        paths.sort();
        info!("analyzing {} files under {}", paths.len(), dir.display());

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .build()
            .map_err(|e| AnalysisError::Config(format!("failed to build worker pool: {e}")))?;

        let outcomes: Vec<std::result::Result<Option<MetricSet>, AnalysisError>> =
            pool.install(|| {
                paths
                    .par_iter()
                    .map(|path| self.analyze_file(path))
                    .collect()
            });

        let mut result = BatchResult::default();
        for (path, outcome) in paths.iter().zip(outcomes) {
            match outcome {
                Ok(Some(metrics)) => result.files.push(metrics),
                Ok(None) => {
                    debug!("excluded (insufficient documentation): {}", path.display());
                    result.skipped += 1;
                }
                Err(e) if e.is_recoverable() => {
                    warn!("excluded {}: {e}", path.display());
                    result.failed += 1;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(result)
    }
}

/// Identifiers start at the first `data/` component when present, keeping
/// exports stable across checkouts.
pub fn trim_identifier(path: &Path) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    match normalized.find("data/") {
        Some(pos) => normalized[pos..].to_string(),
        None => normalized,
    }
}
