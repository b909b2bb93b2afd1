//! Arrow schema conversion
//!
//! Maps a merged schema tree onto Arrow types and decodes JSON records
//! into a RecordBatch with the result.

use crate::error::{Error, Result};
use crate::schema::{JsonType, ObjectStrategy, Resolved, SchemaBuilder, SchemaNode, Strategy};
use arrow::datatypes::{DataType, Field, Fields, Schema};
use arrow::json::ReaderBuilder;
use arrow::record_batch::RecordBatch;
use serde_json::Value;
use std::sync::Arc;

/// Convert a builder's merged schema into an Arrow schema
///
/// The root must be a record. Every field is nullable.
pub fn to_arrow_schema(builder: &SchemaBuilder) -> Result<Schema> {
    match builder.root().resolve() {
        Resolved::Strategy(Strategy::Object(object)) => Ok(Schema::new(object_fields(object))),
        _ => Err(Error::output(
            "Only a record schema can be converted to an Arrow schema",
        )),
    }
}

/// Infer an Arrow schema from a set of JSON records
pub fn infer_arrow_schema(records: &[Value]) -> Result<Schema> {
    if records.is_empty() {
        return Ok(Schema::empty());
    }

    let mut builder = SchemaBuilder::new();
    builder.add_objects(records)?;
    to_arrow_schema(&builder)
}

/// Arrow type of a single schema node
pub fn to_arrow_type(node: &SchemaNode) -> DataType {
    match node.resolve() {
        Resolved::Leaf(json_type) => leaf_type(json_type),
        Resolved::Strategy(strategy) => match strategy {
            Strategy::Typeless(_) | Strategy::Null(_) => DataType::Null,
            Strategy::Boolean(_) => DataType::Boolean,
            Strategy::Number(number) => leaf_type(number.json_type()),
            Strategy::String(_) => DataType::Utf8,
            Strategy::List(list) => {
                DataType::List(Arc::new(Field::new("item", to_arrow_type(list.items()), true)))
            }
            Strategy::Tuple(tuple) => {
                let fields: Vec<Field> = tuple
                    .items()
                    .iter()
                    .enumerate()
                    .map(|(i, node)| Field::new(format!("_{i}"), to_arrow_type(node), true))
                    .collect();
                DataType::Struct(Fields::from(fields))
            }
            Strategy::Object(object) => DataType::Struct(Fields::from(object_fields(object))),
        },
    }
}

/// Decode JSON records into a RecordBatch using the given schema
pub fn records_to_batch(records: &[Value], schema: &Schema) -> Result<RecordBatch> {
    let schema = Arc::new(schema.clone());
    if records.is_empty() {
        return Ok(RecordBatch::new_empty(schema));
    }

    let mut decoder = ReaderBuilder::new(schema.clone())
        .with_batch_size(records.len())
        .with_coerce_primitive(true)
        .build_decoder()?;
    decoder.serialize(records)?;
    decoder
        .flush()?
        .ok_or_else(|| Error::output("No rows decoded"))
}

fn object_fields(object: &ObjectStrategy) -> Vec<Field> {
    object
        .properties()
        .map(|(name, node)| Field::new(name, to_arrow_type(node), true))
        .collect()
}

fn leaf_type(json_type: JsonType) -> DataType {
    match json_type {
        JsonType::Null => DataType::Null,
        JsonType::Boolean => DataType::Boolean,
        JsonType::Integer => DataType::Int64,
        JsonType::Number => DataType::Float64,
        JsonType::String => DataType::Utf8,
    }
}
