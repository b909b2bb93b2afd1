//! Sequence strategies
//!
//! Two mutually exclusive shapes for array data:
//! - `ListStrategy` - every element shares one merged item schema
//! - `TupleStrategy` - each position has its own merged schema

use super::node::SchemaNode;
use super::render::{ddl_join, field_entry, RenderOptions};
use super::strategy::{has_type, ExtraKeywords, SchemaStrategy};
use crate::error::Result;
use crate::types::{JsonObject, JsonValue};
use serde_json::json;
use tracing::warn;

const KEYWORDS: &[&str] = &["type", "items"];

/// Avro/Spark array wrapper around a rendered element type
///
/// Without a field name the wrapper is bare. Elements render that way,
/// and the builder names a sequence root itself.
fn array_struct(element_type: JsonValue, field_name: Option<&str>) -> JsonValue {
    let array_type = json!({
        "type": "array",
        "elementType": element_type,
        "containsNull": true,
    });
    match field_name {
        Some(name) => field_entry(name, array_type),
        None => array_type,
    }
}

fn ignore_items(strategy: &str, items: &JsonValue) {
    warn!(
        strategy,
        items = %items,
        "Schema incompatible, items keyword has the wrong shape"
    );
}

// ============================================================================
// List
// ============================================================================

/// List-style arrays, the default strategy for array data
#[derive(Debug, Clone, Default)]
pub struct ListStrategy {
    extra: ExtraKeywords,
    items: SchemaNode,
}

impl ListStrategy {
    /// Create an empty list strategy
    pub fn new() -> Self {
        Self::default()
    }

    /// Array fragment whose `items` is absent or a single schema
    pub fn matches_fragment(fragment: &JsonObject) -> bool {
        has_type(fragment, &["array"])
            && fragment
                .get("items")
                .map_or(true, JsonValue::is_object)
    }

    /// Any sequence
    pub fn matches_instance(value: &JsonValue) -> bool {
        value.is_array()
    }

    /// Merged schema of all elements
    pub fn items(&self) -> &SchemaNode {
        &self.items
    }
}

impl SchemaStrategy for ListStrategy {
    fn merge_fragment(&mut self, fragment: &JsonObject) -> Result<()> {
        self.extra.absorb(fragment, KEYWORDS);
        match fragment.get("items") {
            Some(items) if items.is_object() => self.items.add_fragment(items)?,
            // Tuple-style items reach a list only through a typeless fragment
            Some(items) => ignore_items("list", items),
            None => {}
        }
        Ok(())
    }

    fn merge_instance(&mut self, value: &JsonValue) -> Result<()> {
        if let JsonValue::Array(elements) = value {
            for element in elements {
                self.items.add_instance(element)?;
            }
        }
        Ok(())
    }

    fn to_json(&self) -> JsonObject {
        let mut schema = self.extra.to_object();
        schema.insert("type".to_string(), "array".into());
        if !self.items.is_empty() {
            schema.insert("items".to_string(), self.items.to_json());
        }
        schema
    }

    fn to_struct(&self, opts: &RenderOptions<'_>, field_name: Option<&str>) -> JsonValue {
        array_struct(self.items.to_struct(opts, None), field_name)
    }

    fn ddl_type(&self, opts: &RenderOptions<'_>) -> String {
        format!("array<{}>", self.items.ddl_type(opts))
    }
}

// ============================================================================
// Tuple
// ============================================================================

/// Tuple-style arrays with per-position schemas
///
/// The number of positions only grows: it is the longest tuple merged so
/// far. Shorter inputs leave trailing positions untouched.
#[derive(Debug, Clone, Default)]
pub struct TupleStrategy {
    extra: ExtraKeywords,
    items: Vec<SchemaNode>,
}

impl TupleStrategy {
    /// Create an empty tuple strategy
    pub fn new() -> Self {
        Self::default()
    }

    /// Array fragment whose `items` is a list of schemas
    pub fn matches_fragment(fragment: &JsonObject) -> bool {
        has_type(fragment, &["array"]) && fragment.get("items").is_some_and(JsonValue::is_array)
    }

    /// Any sequence
    pub fn matches_instance(value: &JsonValue) -> bool {
        value.is_array()
    }

    /// Per-position schemas
    pub fn items(&self) -> &[SchemaNode] {
        &self.items
    }

    /// Grow to `len` positions with fresh nodes
    fn grow(&mut self, len: usize) {
        if self.items.len() < len {
            self.items.resize_with(len, SchemaNode::new);
        }
    }
}

impl SchemaStrategy for TupleStrategy {
    fn merge_fragment(&mut self, fragment: &JsonObject) -> Result<()> {
        self.extra.absorb(fragment, KEYWORDS);
        let items = match fragment.get("items") {
            Some(JsonValue::Array(items)) => items,
            // List-style items reach a tuple only through a typeless fragment
            Some(items) => {
                ignore_items("tuple", items);
                return Ok(());
            }
            None => return Ok(()),
        };

        self.grow(items.len());
        for (node, item) in self.items.iter_mut().zip(items) {
            node.add_fragment(item)?;
        }
        Ok(())
    }

    fn merge_instance(&mut self, value: &JsonValue) -> Result<()> {
        let JsonValue::Array(elements) = value else {
            return Ok(());
        };

        self.grow(elements.len());
        for (node, element) in self.items.iter_mut().zip(elements) {
            node.add_instance(element)?;
        }
        Ok(())
    }

    fn to_json(&self) -> JsonObject {
        let mut schema = self.extra.to_object();
        schema.insert("type".to_string(), "array".into());
        schema.insert(
            "items".to_string(),
            JsonValue::Array(self.items.iter().map(SchemaNode::to_json).collect()),
        );
        schema
    }

    fn to_struct(&self, opts: &RenderOptions<'_>, field_name: Option<&str>) -> JsonValue {
        let positions = self
            .items
            .iter()
            .map(|node| node.to_struct(opts, None))
            .collect();
        array_struct(JsonValue::Array(positions), field_name)
    }

    fn ddl_type(&self, opts: &RenderOptions<'_>) -> String {
        let positions = self.items.iter().map(|node| node.ddl_type(opts));
        format!("array<{}>", ddl_join(positions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dialect;
    use pretty_assertions::assert_eq;

    fn fragment(value: JsonValue) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_list_matches_fragment() {
        assert!(ListStrategy::matches_fragment(&fragment(json!({"type": "array"}))));
        assert!(ListStrategy::matches_fragment(&fragment(
            json!({"type": "array", "items": {"type": "string"}})
        )));
        assert!(!ListStrategy::matches_fragment(&fragment(
            json!({"type": "array", "items": [{"type": "string"}]})
        )));
        assert!(!ListStrategy::matches_fragment(&fragment(json!({"type": "object"}))));
    }

    #[test]
    fn test_tuple_matches_fragment() {
        assert!(TupleStrategy::matches_fragment(&fragment(
            json!({"type": "array", "items": []})
        )));
        assert!(!TupleStrategy::matches_fragment(&fragment(json!({"type": "array"}))));
        assert!(!TupleStrategy::matches_fragment(&fragment(
            json!({"type": "array", "items": {}})
        )));
    }

    #[test]
    fn test_both_match_sequences_only() {
        assert!(ListStrategy::matches_instance(&json!([1])));
        assert!(TupleStrategy::matches_instance(&json!([])));
        assert!(!ListStrategy::matches_instance(&json!({"a": 1})));
        assert!(!TupleStrategy::matches_instance(&json!("abc")));
    }

    #[test]
    fn test_list_merges_elements() {
        let mut list = ListStrategy::new();
        list.merge_instance(&json!([1, 2])).unwrap();
        list.merge_instance(&json!([1, "a"])).unwrap();
        assert_eq!(
            JsonValue::Object(list.to_json()),
            json!({"type": "array", "items": {"type": ["integer", "string"]}})
        );
    }

    #[test]
    fn test_list_empty_omits_items() {
        let mut list = ListStrategy::new();
        list.merge_instance(&json!([])).unwrap();
        assert_eq!(JsonValue::Object(list.to_json()), json!({"type": "array"}));
    }

    #[test]
    fn test_tuple_grows_monotonically() {
        let mut tuple = TupleStrategy::new();
        tuple.merge_instance(&json!([1, 2])).unwrap();
        tuple.merge_instance(&json!([1, 2, "three"])).unwrap();
        tuple.merge_instance(&json!([true])).unwrap();
        assert_eq!(tuple.items().len(), 3);
        assert_eq!(
            JsonValue::Object(tuple.to_json()),
            json!({
                "type": "array",
                "items": [
                    {"type": ["boolean", "integer"]},
                    {"type": "integer"},
                    {"type": "string"}
                ]
            })
        );
    }

    #[test]
    fn test_tuple_empty_instance_is_noop() {
        let mut tuple = TupleStrategy::new();
        tuple.merge_instance(&json!([])).unwrap();
        assert!(tuple.items().is_empty());
    }

    #[test]
    fn test_tuple_fragment_padding() {
        let mut tuple = TupleStrategy::new();
        tuple
            .merge_fragment(&fragment(json!({"type": "array", "items": [{"type": "string"}]})))
            .unwrap();
        tuple
            .merge_fragment(&fragment(
                json!({"type": "array", "items": [{"type": "string"}, {"type": "null"}]}),
            ))
            .unwrap();
        assert_eq!(
            JsonValue::Object(tuple.to_json()),
            json!({"type": "array", "items": [{"type": "string"}, {"type": "null"}]})
        );
    }

    #[test]
    fn test_list_spark_named() {
        let mut list = ListStrategy::new();
        list.merge_instance(&json!(["a"])).unwrap();
        let opts = RenderOptions::new(Dialect::Spark);
        assert_eq!(
            list.to_struct(&opts, Some("tags")),
            json!({
                "name": "tags",
                "type": {"type": "array", "elementType": "string", "containsNull": true},
                "nullable": true,
                "metadata": {}
            })
        );
    }

    #[test]
    fn test_list_ddl() {
        let mut list = ListStrategy::new();
        list.merge_instance(&json!([{"x": 1}])).unwrap();
        let opts = RenderOptions::new(Dialect::Ddl);
        assert_eq!(
            list.render(&opts, Some("points")).as_ddl(),
            Some("points:array<struct<x:bigint>>")
        );
        assert_eq!(list.render(&opts, None).as_ddl(), Some("array<struct<x:bigint>>"));
    }

    #[test]
    fn test_tuple_ddl_joins_positions() {
        let mut tuple = TupleStrategy::new();
        tuple.merge_instance(&json!([1, "a"])).unwrap();
        let opts = RenderOptions::new(Dialect::Ddl);
        assert_eq!(
            tuple.render(&opts, Some("pair")).as_ddl(),
            Some("pair:array<bigint,string>")
        );
    }

    #[test]
    fn test_tuple_avro_positions() {
        let mut tuple = TupleStrategy::new();
        tuple.merge_instance(&json!([1.5, null])).unwrap();
        let opts = RenderOptions::new(Dialect::Avro);
        assert_eq!(
            tuple.to_struct(&opts, None),
            json!({"type": "array", "elementType": ["double", "null"], "containsNull": true})
        );
    }
}
