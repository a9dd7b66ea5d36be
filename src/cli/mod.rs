//! CLI command definitions and handlers

use crate::analyzer::Analyzer;
use crate::config::{AccuracyBackendKind, Config, CONFIG_FILE, CONFIG_TEMPLATE};
use crate::error::AnalysisError;
use crate::models::MetricSet;
use crate::reporters::{self, OutputFormat};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// docuscore - Documentation quality metrics
///
/// Scores how well comments and docstrings document their code.
#[derive(Parser, Debug)]
#[command(name = "docuscore")]
#[command(
    version,
    about = "Score documentation quality — comment density, completeness, conciseness, and semantic accuracy for Python codebases",
    long_about = "docuscore parses Python source files and scores how well their comments and \
docstrings document the code: comment density, docstring completeness, conciseness, \
and semantic accuracy, combined into a weighted overall score per file and per project.\n\n\
Built for comparing human-written and LLM-generated documentation. Files without \
enough documentation to judge are excluded rather than scored as zero.",
    after_help = "\
Examples:
  docuscore analyze .                        Analyze current directory
  docuscore analyze src/module.py            Analyze a single file
  docuscore analyze . --format json          JSON output for scripting
  docuscore analyze . --accuracy-backend overlap   Run without a model server
  docuscore export data/ -o metrics.csv      Analyze and write CSV rows
  docuscore init                             Write a docuscore.toml template"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Number of parallel workers (1-64)
    #[arg(long, global = true, default_value = "8", value_parser = parse_workers)]
    pub workers: usize,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a docuscore.toml config file with example settings
    Init,

    /// Analyze a file or directory and report documentation metrics
    #[command(after_help = "\
Examples:
  docuscore analyze .                        Analyze current directory
  docuscore analyze data/demo/add_llm.py     Analyze one file
  docuscore analyze . --format csv -o out.csv
  docuscore analyze . --accuracy-backend overlap")]
    Analyze {
        /// Path to a Python file or a directory to analyze
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format: text, json, csv
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json", "csv"])]
        format: String,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Accuracy backend: embedding (model server) or overlap (offline)
        #[arg(long, value_parser = ["embedding", "overlap"])]
        accuracy_backend: Option<String>,

        /// Override the sentence-embedding endpoint
        #[arg(long)]
        text_endpoint: Option<String>,

        /// Override the code-embedding endpoint
        #[arg(long)]
        code_endpoint: Option<String>,
    },

    /// Analyze a directory and export combined metrics as CSV
    Export {
        /// Directory to analyze
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output CSV path
        #[arg(long, short = 'o', default_value = "exports/all_metrics_combined.csv")]
        output: PathBuf,

        /// Accuracy backend: embedding (model server) or overlap (offline)
        #[arg(long, value_parser = ["embedding", "overlap"])]
        accuracy_backend: Option<String>,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    let workers = cli.workers;
    match cli.command {
        Some(Commands::Init) => run_init(),
        Some(Commands::Analyze {
            path,
            format,
            output,
            accuracy_backend,
            text_endpoint,
            code_endpoint,
        }) => {
            let format: OutputFormat = format.parse()?;
            let config = load_config(
                &path,
                accuracy_backend.as_deref(),
                text_endpoint,
                code_endpoint,
            )?;
            run_analyze(&path, &config, format, output.as_deref(), workers)
        }
        Some(Commands::Export {
            path,
            output,
            accuracy_backend,
        }) => {
            let config = load_config(&path, accuracy_backend.as_deref(), None, None)?;
            run_analyze(
                &path,
                &config,
                OutputFormat::Csv,
                Some(output.as_path()),
                workers,
            )
        }
        None => {
            let path = PathBuf::from(".");
            let config = load_config(&path, None, None, None)?;
            run_analyze(&path, &config, OutputFormat::Text, None, workers)
        }
    }
}

/// Load configuration relative to the analyzed path, with CLI overrides
/// applied on top.
fn load_config(
    path: &Path,
    accuracy_backend: Option<&str>,
    text_endpoint: Option<String>,
    code_endpoint: Option<String>,
) -> Result<Config> {
    let config_dir = if path.is_dir() {
        path
    } else {
        path.parent().unwrap_or(Path::new("."))
    };
    let mut config = Config::load(config_dir)?;

    match accuracy_backend {
        Some("overlap") => config.embeddings.backend = AccuracyBackendKind::Overlap,
        Some("embedding") => config.embeddings.backend = AccuracyBackendKind::Embedding,
        _ => {}
    }
    if let Some(endpoint) = text_endpoint {
        config.embeddings.text_endpoint = endpoint;
    }
    if let Some(endpoint) = code_endpoint {
        config.embeddings.code_endpoint = endpoint;
    }
    config.validate()?;
    Ok(config)
}

fn run_init() -> Result<()> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() {
        bail!("{} already exists, not overwriting", CONFIG_FILE);
    }
    std::fs::write(path, CONFIG_TEMPLATE).context("failed to write config template")?;
    println!("Wrote {}", style(CONFIG_FILE).green());
    Ok(())
}

fn run_analyze(
    path: &Path,
    config: &Config,
    format: OutputFormat,
    output: Option<&Path>,
    workers: usize,
) -> Result<()> {
    let analyzer = Analyzer::from_config(config)?;

    let (files, skipped, failed) = if path.is_file() {
        // An explicitly named file propagates its errors instead of
        // silently vanishing from the results.
        match analyzer.analyze_file(path)? {
            Some(metrics) => (vec![metrics], 0, 0),
            None => bail!(AnalysisError::InsufficientData(format!(
                "{} has too little documentation to score",
                path.display()
            ))),
        }
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}").expect("static template"),
        );
        spinner.set_message(format!("Analyzing {}...", path.display()));
        spinner.enable_steady_tick(Duration::from_millis(100));
        let batch = analyzer.analyze_directory(path, workers)?;
        spinner.finish_and_clear();
        (batch.files, batch.skipped, batch.failed)
    };

    if files.is_empty() {
        bail!(
            "no scoreable files under {} ({} skipped for insufficient documentation, {} failed)",
            path.display(),
            skipped,
            failed
        );
    }

    let project = analyzer.aggregator().aggregate_project(&files)?;
    let rendered = reporters::report(&files, &project, format)?;

    match output {
        Some(out_path) => {
            if let Some(parent) = out_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create {}", parent.display()))?;
                }
            }
            std::fs::write(out_path, &rendered)
                .with_context(|| format!("failed to write {}", out_path.display()))?;
            eprintln!(
                "Wrote {} ({} file rows + 1 project row)",
                style(out_path.display()).green(),
                files.len()
            );
        }
        None => print!("{rendered}"),
    }

    summarize_exclusions(skipped, failed, &files);
    Ok(())
}

fn summarize_exclusions(skipped: usize, failed: usize, files: &[MetricSet]) {
    if skipped > 0 || failed > 0 {
        eprintln!(
            "{}",
            style(format!(
                "{} analyzed, {} excluded (insufficient documentation), {} failed to parse",
                files.len(),
                skipped,
                failed
            ))
            .dim()
        );
    }
}
