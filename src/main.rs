//! Solidafy Schema CLI
//!
//! Command-line interface for schema inference

use clap::Parser;
use solidafy_schema::cli::{Cli, Runner};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    Runner::new(cli).run()?;
    Ok(())
}
