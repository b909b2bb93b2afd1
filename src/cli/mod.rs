//! CLI module
//!
//! Command-line interface for merging JSON documents into one schema.
//!
//! Schema fragments (`--schema`) are merged first, then every input file
//! (or stdin). The result is printed in the selected dialect.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::Runner;
