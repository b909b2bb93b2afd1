// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # Solidafy Schema
//!
//! Incremental schema inference and merging.
//!
//! Feed it raw JSON instances and/or existing JSON Schema fragments; it
//! keeps one merged schema compatible with everything seen so far and
//! renders it as JSON Schema, an Avro-style record, a Spark struct, or a
//! flat DDL declaration.
//!
//! ## Quick Start
//!
//! ```rust
//! use solidafy_schema::{Dialect, SchemaBuilder};
//! use serde_json::json;
//!
//! let mut builder = SchemaBuilder::new();
//! builder.add_object(&json!({"a": 1})).unwrap();
//! builder.add_object(&json!({"a": 2, "b": "x"})).unwrap();
//!
//! let schema = builder.to_schema_as(Dialect::Json).into_value();
//! assert_eq!(schema["required"], json!(["a"]));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        SchemaBuilder                            │
//! │   add_schema(fragment)   add_object(instance)   to_schema()     │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//!                           SchemaNode  (dispatch by StrategyKind::REGISTRY)
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │  Scalar  │   List    │     Tuple     │  Object   │   Output    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ null     │ one item  │ per-position  │ props     │ JSON Schema │
//! │ boolean  │ schema    │ schemas       │ patterns  │ Avro        │
//! │ number   │           │               │ required  │ Spark / DDL │
//! │ string   │           │               │           │ Arrow       │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Builder configuration
pub mod config;

/// Schema strategies, nodes and the builder
pub mod schema;

/// Arrow schema output
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::BuilderConfig;
pub use error::{Error, Result};
pub use schema::{Rendered, SchemaBuilder, SchemaNode};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
