//! CLI argument parsing

use crate::types::Dialect;
use clap::Parser;
use std::path::PathBuf;

/// Infer and merge schemas from JSON documents
#[derive(Parser, Debug)]
#[command(name = "solidafy-schema")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON files with instances to merge (stdin when no files or schemas are given)
    pub inputs: Vec<PathBuf>,

    /// Schema fragment files to merge before the instances
    #[arg(short, long = "schema")]
    pub schemas: Vec<PathBuf>,

    /// Output dialect (overrides the config file)
    #[arg(short, long)]
    pub dialect: Option<Dialect>,

    /// Builder configuration file (YAML or JSON)
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// `$schema` URI for JSON Schema output
    #[arg(long)]
    pub schema_uri: Option<String>,

    /// Pretty-print structured output
    #[arg(short, long)]
    pub pretty: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
