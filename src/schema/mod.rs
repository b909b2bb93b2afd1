//! Schema inference and merging
//!
//! Builds one schema compatible with every instance and schema fragment
//! it has seen, then renders it as JSON Schema, Avro, Spark or DDL.
//!
//! # Features
//!
//! - **Strategy Dispatch**: Each tree node routes input to a closed set of strategies
//! - **List and Tuple Arrays**: Shared item schema or per-position schemas
//! - **Required Inference**: Properties present in every observed object
//! - **Pattern Properties**: Keys routed by the first matching regex
//! - **Four Dialects**: One merged tree, four output shapes

mod array;
mod builder;
mod node;
mod object;
mod render;
mod scalar;
mod strategy;
mod types;

pub use array::{ListStrategy, TupleStrategy};
pub use builder::SchemaBuilder;
pub use node::{Resolved, SchemaNode};
pub use object::ObjectStrategy;
pub use render::{RenderOptions, Rendered};
pub use scalar::{ScalarStrategy, TypelessStrategy};
pub use strategy::{ExtraKeywords, SchemaStrategy, Strategy, StrategyKind};
pub use types::JsonType;
