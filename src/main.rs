//! docuscore - Documentation quality CLI
//!
//! Scores comment density, docstring completeness, conciseness, and semantic
//! accuracy for Python codebases, per file and per project.

use anyhow::Result;
use clap::Parser;
use docuscore::cli::{self, Cli};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; --log-level is the fallback.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.clone()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run(cli)
}
