//! Configuration for docuscore
//!
//! Loads `docuscore.toml` from the analyzed directory (or uses defaults), and
//! validates it once at load time. The weight table in particular must sum to
//! 1.0 — a bad table is a startup error, not something re-checked per call.
//!
//! ```toml
//! # docuscore.toml
//!
//! [weights]
//! comment_density = 0.25
//! completeness = 0.25
//! conciseness = 0.25
//! accuracy = 0.25
//!
//! [thresholds]
//! verbose_words = 20
//! similarity = 0.70
//! ideal_density_low = 0.10
//! ideal_density_high = 0.35
//! min_inline_comments = 2
//! min_docstrings = 1
//!
//! [embeddings]
//! backend = "embedding"   # or "overlap" to run without a model server
//! text_endpoint = "http://localhost:8080"
//! code_endpoint = "http://localhost:8081"
//! timeout_secs = 30
//! ```

use crate::error::{AnalysisError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

pub const CONFIG_FILE: &str = "docuscore.toml";

/// Metric weights for the overall score. Must sum to 1.0.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub comment_density: f64,
    pub completeness: f64,
    pub conciseness: f64,
    pub accuracy: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            comment_density: 0.25,
            completeness: 0.25,
            conciseness: 0.25,
            accuracy: 0.25,
        }
    }
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.comment_density + self.completeness + self.conciseness + self.accuracy
    }

    /// Reject any table that does not sum to 1.0 (within float tolerance).
    pub fn validate(&self) -> Result<()> {
        let sum = self.sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(AnalysisError::Config(format!(
                "metric weights must sum to 1.0, got {sum}"
            )));
        }
        for (name, w) in [
            ("comment_density", self.comment_density),
            ("completeness", self.completeness),
            ("conciseness", self.conciseness),
            ("accuracy", self.accuracy),
        ] {
            if !(0.0..=1.0).contains(&w) {
                return Err(AnalysisError::Config(format!(
                    "weight {name} must be in [0, 1], got {w}"
                )));
            }
        }
        Ok(())
    }
}

/// Tunable thresholds for the metric algorithms.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// A sentence longer than this many words is verbose.
    pub verbose_words: usize,
    /// Cosine similarity at or above this marks a description redundant.
    pub similarity: f64,
    /// Lower edge of the ideal comment-density band.
    pub ideal_density_low: f64,
    /// Upper edge of the ideal comment-density band.
    pub ideal_density_high: f64,
    /// A unit needs at least this many inline comments to be scoreable.
    pub min_inline_comments: usize,
    /// A unit needs at least this many docstrings to be scoreable.
    pub min_docstrings: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            verbose_words: 20,
            similarity: 0.70,
            ideal_density_low: 0.10,
            ideal_density_high: 0.35,
            min_inline_comments: 2,
            min_docstrings: 1,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<()> {
        if self.ideal_density_low <= 0.0
            || self.ideal_density_high >= 1.0
            || self.ideal_density_low >= self.ideal_density_high
        {
            return Err(AnalysisError::Config(format!(
                "ideal density band must satisfy 0 < low < high < 1, got [{}, {}]",
                self.ideal_density_low, self.ideal_density_high
            )));
        }
        if !(0.0..=1.0).contains(&self.similarity) {
            return Err(AnalysisError::Config(format!(
                "similarity threshold must be in [0, 1], got {}",
                self.similarity
            )));
        }
        Ok(())
    }
}

/// Which backend scores semantic accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccuracyBackendKind {
    /// Code-aware embedding model behind an HTTP endpoint.
    #[default]
    Embedding,
    /// Identifier-token overlap; runs fully offline.
    Overlap,
}

/// Embedding service endpoints and behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub backend: AccuracyBackendKind,
    /// Generic sentence-embedding endpoint (conciseness).
    pub text_endpoint: String,
    /// Code-aware embedding endpoint (accuracy).
    pub code_endpoint: String,
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: AccuracyBackendKind::default(),
            text_endpoint: "http://localhost:8080".to_string(),
            code_endpoint: "http://localhost:8081".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Full configuration, as read from `docuscore.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub weights: Weights,
    pub thresholds: Thresholds,
    pub embeddings: EmbeddingConfig,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        self.thresholds.validate()
    }

    /// Load `docuscore.toml` from `dir` if present, otherwise defaults.
    /// Validation runs in both cases.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        let config = if path.is_file() {
            let text = std::fs::read_to_string(&path).map_err(|source| AnalysisError::Io {
                path: path.clone(),
                source,
            })?;
            let config: Config = toml::from_str(&text)
                .map_err(|e| AnalysisError::Config(format!("{}: {e}", path.display())))?;
            debug!("loaded configuration from {}", path.display());
            config
        } else {
            Config::default()
        };
        config.validate()?;
        Ok(config)
    }
}

/// Template written by `docuscore init`.
pub const CONFIG_TEMPLATE: &str = r#"# docuscore configuration
#
# Metric weights for the overall score. Must sum to 1.0.
[weights]
comment_density = 0.25
completeness = 0.25
conciseness = 0.25
accuracy = 0.25

[thresholds]
# A sentence longer than this many words counts as verbose.
verbose_words = 20
# Cosine similarity at or above this marks a description redundant.
similarity = 0.70
# Ideal comment-density band; ratios inside it score 1.0.
ideal_density_low = 0.10
ideal_density_high = 0.35
# Units below these documentation counts are skipped, not scored as zero.
min_inline_comments = 2
min_docstrings = 1

[embeddings]
# "embedding" uses the endpoints below; "overlap" needs no model server.
backend = "embedding"
text_endpoint = "http://localhost:8080"
code_endpoint = "http://localhost:8081"
timeout_secs = 30
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        Config::default().validate().expect("defaults must validate");
    }

    #[test]
    fn weights_sum_to_one_enforced() {
        let weights = Weights {
            comment_density: 0.25,
            completeness: 0.25,
            conciseness: 0.25,
            accuracy: 0.24,
        };
        assert!(weights.validate().is_err(), "0.99 total must be rejected");
    }

    #[test]
    fn negative_weight_rejected() {
        let weights = Weights {
            comment_density: -0.25,
            completeness: 0.5,
            conciseness: 0.5,
            accuracy: 0.25,
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn loads_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[weights]\ncomment_density = 0.4\ncompleteness = 0.3\nconciseness = 0.2\naccuracy = 0.1\n",
        )
        .unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.weights.comment_density, 0.4);
        // Untouched sections keep defaults
        assert_eq!(config.thresholds.verbose_words, 20);
    }

    #[test]
    fn bad_weight_table_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[weights]\ncomment_density = 0.9\ncompleteness = 0.3\nconciseness = 0.2\naccuracy = 0.1\n",
        )
        .unwrap();
        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn config_template_parses_and_validates() {
        let config: Config = toml::from_str(CONFIG_TEMPLATE).unwrap();
        config.validate().unwrap();
    }

    #[test]
    fn inverted_density_band_rejected() {
        let thresholds = Thresholds {
            ideal_density_low: 0.5,
            ideal_density_high: 0.3,
            ..Thresholds::default()
        };
        assert!(thresholds.validate().is_err());
    }
}
