//! Output module
//!
//! Arrow schemas and RecordBatches from merged schemas.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Converting a merged schema tree into an Arrow schema
//! - Inferring Arrow schemas directly from JSON records
//! - Decoding JSON records into Arrow RecordBatches

mod schema;

pub use schema::{infer_arrow_schema, records_to_batch, to_arrow_schema, to_arrow_type};
