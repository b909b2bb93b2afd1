//! Integration tests for the schema builder
//!
//! Tests the full flow: instances and fragments → merged tree → every dialect

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use solidafy_schema::output::{records_to_batch, to_arrow_schema};
use solidafy_schema::{BuilderConfig, Dialect, Error, Rendered, SchemaBuilder};

fn events() -> Vec<Value> {
    vec![
        json!({"id": 1, "kind": "click", "tags": ["a"], "meta": {"x": 1}}),
        json!({"id": 2, "kind": "view", "tags": [], "meta": {"x": 2.5, "y": null}}),
        json!({"id": 3, "tags": ["b", "c"], "meta": {"x": 3}}),
    ]
}

fn builder_for(dialect: Dialect) -> SchemaBuilder {
    let mut builder = SchemaBuilder::with_dialect(dialect);
    builder.add_objects(&events()).unwrap();
    builder
}

// ============================================================================
// JSON Schema
// ============================================================================

#[test]
fn test_json_schema_from_events() {
    let schema = builder_for(Dialect::Json).to_schema().into_value();
    assert_eq!(
        schema,
        json!({
            "$schema": "http://json-schema.org/schema#",
            "type": "object",
            "properties": {
                "id": {"type": "integer"},
                "kind": {"type": "string"},
                "tags": {"type": "array", "items": {"type": "string"}},
                "meta": {
                    "type": "object",
                    "properties": {
                        "x": {"type": "number"},
                        "y": {"type": "null"}
                    },
                    "required": ["x"]
                }
            },
            "required": ["id", "meta", "tags"]
        })
    );
}

#[test]
fn test_json_schema_property_order_follows_input() {
    let schema = builder_for(Dialect::Json).to_schema().into_value();
    let keys: Vec<&str> = schema["properties"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["id", "kind", "tags", "meta"]);
}

#[test]
fn test_fragment_and_instances_merge() {
    let mut builder = SchemaBuilder::new();
    builder
        .add_schema(&json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "properties": {"id": {"type": "integer", "description": "primary key"}},
            "required": ["id"]
        }))
        .unwrap();
    builder.add_object(&json!({"id": 10, "note": "hi"})).unwrap();

    assert_eq!(
        builder.schema_uri(),
        Some("http://json-schema.org/draft-07/schema#")
    );
    assert_eq!(
        builder.to_schema().into_value(),
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "properties": {
                "id": {"type": "integer", "description": "primary key"},
                "note": {"type": "string"}
            },
            "required": ["id"]
        })
    );
}

#[test]
fn test_no_schema_uri() {
    let config = BuilderConfig::default().with_schema_uri(None);
    let mut builder = SchemaBuilder::with_config(config);
    builder.add_object(&json!("text")).unwrap();
    assert_eq!(builder.to_schema().into_value(), json!({"type": "string"}));
}

#[test]
fn test_unknown_fragment_type_is_reported() {
    let mut builder = SchemaBuilder::new();
    let err = builder
        .add_schema(&json!({"type": "african swallow"}))
        .unwrap_err();
    assert!(matches!(err, Error::NoStrategy { .. }));
    assert!(err.is_input_error());
}

#[test]
fn test_non_object_fragment_is_rejected() {
    let mut builder = SchemaBuilder::new();
    let err = builder.add_schema(&json!(["not", "a", "schema"])).unwrap_err();
    assert!(matches!(err, Error::InvalidFragment { .. }));
}

#[test]
fn test_add_builder_combines_sessions() {
    let mut left = SchemaBuilder::new();
    left.add_object(&json!({"a": 1})).unwrap();
    let mut right = SchemaBuilder::new();
    right.add_object(&json!({"b": true})).unwrap();

    left.add_builder(&right).unwrap();

    let mut expected = SchemaBuilder::new();
    expected.add_object(&json!({"a": 1})).unwrap();
    expected.add_object(&json!({"b": true})).unwrap();
    assert!(left == expected);
    assert!(left.to_schema().into_value().get("required").is_none());
}

#[test]
fn test_round_trip_through_rendered_schema() {
    let original = builder_for(Dialect::Json);
    let mut copy = SchemaBuilder::new();
    copy.add_schema(&original.to_schema().into_value()).unwrap();
    assert!(copy == original);
}

// ============================================================================
// Other dialects
// ============================================================================

#[test]
fn test_avro_from_events() {
    let schema = builder_for(Dialect::Avro).to_schema().into_value();
    assert_eq!(schema["name"], "DynamicRecord");
    assert_eq!(schema["namespace"], "root");
    assert_eq!(schema["type"], "record");

    let fields = schema["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 4);
    assert_eq!(
        fields[2],
        json!({
            "name": "tags",
            "type": {"type": "array", "elementType": "string", "containsNull": true},
            "nullable": true,
            "metadata": {}
        })
    );
    assert_eq!(fields[3]["type"][0]["type"], "record");
    assert_eq!(fields[3]["type"][0]["name"], "meta");
    assert_eq!(fields[3]["type"][1], "null");
}

#[test]
fn test_avro_custom_root() {
    let config = BuilderConfig::new(Dialect::Avro).with_root("Event", "com.example");
    let mut builder = SchemaBuilder::with_config(config);
    builder.add_object(&json!({"id": 1})).unwrap();
    let schema = builder.to_schema().into_value();
    assert_eq!(schema["name"], "Event");
    assert_eq!(schema["namespace"], "com.example");
}

#[test]
fn test_spark_from_events() {
    let schema = builder_for(Dialect::Spark).to_schema().into_value();
    assert_eq!(schema["type"], "struct");
    assert!(schema.get("name").is_none());
    assert_eq!(
        schema["fields"][3],
        json!({
            "name": "meta",
            "type": {
                "type": "struct",
                "fields": [
                    {"name": "x", "type": "double", "nullable": true, "metadata": {}},
                    {"name": "y", "type": "null", "nullable": true, "metadata": {}}
                ]
            },
            "nullable": true,
            "metadata": {}
        })
    );
}

#[test]
fn test_ddl_from_events() {
    let rendered = builder_for(Dialect::Ddl).to_schema();
    assert_eq!(
        rendered,
        Rendered::Ddl(
            "id:bigint,kind:string,tags:array<string>,meta:struct<x:double,y:void>".to_string()
        )
    );
    assert_eq!(
        builder_for(Dialect::Ddl).to_json(true).unwrap(),
        "id:bigint,kind:string,tags:array<string>,meta:struct<x:double,y:void>"
    );
}

#[test]
fn test_one_tree_renders_every_dialect() {
    let builder = builder_for(Dialect::Json);
    for dialect in Dialect::ALL {
        let rendered = builder.to_schema_as(dialect);
        assert_eq!(rendered.as_ddl().is_some(), dialect.is_textual());
    }
}

// ============================================================================
// Arrow
// ============================================================================

#[test]
fn test_arrow_schema_and_batch() {
    let builder = builder_for(Dialect::Json);
    let schema = to_arrow_schema(&builder).unwrap();
    assert_eq!(schema.fields().len(), 4);

    let records = vec![
        json!({"id": 1, "kind": "click", "tags": ["a"]}),
        json!({"id": 2, "tags": []}),
    ];
    let batch = records_to_batch(&records, &schema).unwrap();
    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.num_columns(), 4);
}
