//! Leaf strategies for null, boolean, number and string data

use super::render::{field_entry, RenderOptions};
use super::strategy::{ExtraKeywords, SchemaStrategy};
use super::types::JsonType;
use crate::error::Result;
use crate::types::{JsonObject, JsonValue};

/// Avro/Spark rendering of a leaf type
pub(crate) fn leaf_struct(
    json_type: JsonType,
    opts: &RenderOptions<'_>,
    field_name: Option<&str>,
) -> JsonValue {
    let tag = JsonValue::String(json_type.tag(opts.dialect).to_string());
    match field_name {
        Some(name) => field_entry(name, tag),
        None => tag,
    }
}

// ============================================================================
// Scalar
// ============================================================================

/// Strategy for a single scalar JSON type
///
/// Numbers start out as `integer` and widen to `number` once a float
/// instance or a `number` fragment is merged.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarStrategy {
    json_type: JsonType,
    extra: ExtraKeywords,
}

impl ScalarStrategy {
    const KEYWORDS: &'static [&'static str] = &["type"];

    /// Create a strategy for the given leaf type
    pub fn new(json_type: JsonType) -> Self {
        Self {
            json_type,
            extra: ExtraKeywords::default(),
        }
    }

    /// The merged leaf type
    pub fn json_type(&self) -> JsonType {
        self.json_type
    }

    fn is_numeric(&self) -> bool {
        matches!(self.json_type, JsonType::Integer | JsonType::Number)
    }
}

impl SchemaStrategy for ScalarStrategy {
    fn merge_fragment(&mut self, fragment: &JsonObject) -> Result<()> {
        self.extra.absorb(fragment, Self::KEYWORDS);
        if self.is_numeric() {
            if let Some(JsonType::Number) = fragment
                .get("type")
                .and_then(JsonValue::as_str)
                .and_then(JsonType::from_tag)
            {
                self.json_type = self.json_type.widen();
            }
        }
        Ok(())
    }

    fn merge_instance(&mut self, value: &JsonValue) -> Result<()> {
        if self.is_numeric() && value.is_f64() {
            self.json_type = self.json_type.widen();
        }
        Ok(())
    }

    fn to_json(&self) -> JsonObject {
        let mut schema = self.extra.to_object();
        schema.insert("type".to_string(), self.json_type.to_string().into());
        schema
    }

    fn to_struct(&self, opts: &RenderOptions<'_>, field_name: Option<&str>) -> JsonValue {
        leaf_struct(self.json_type, opts, field_name)
    }

    fn ddl_type(&self, opts: &RenderOptions<'_>) -> String {
        self.json_type.tag(opts.dialect).to_string()
    }
}

// ============================================================================
// Typeless
// ============================================================================

/// Placeholder for fragments that carry no `type` keyword
///
/// Its keywords are folded into the first typed strategy created on the
/// same node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypelessStrategy {
    extra: ExtraKeywords,
}

impl TypelessStrategy {
    /// Create an empty placeholder
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches fragments without a `type` keyword
    pub fn matches_fragment(fragment: &JsonObject) -> bool {
        !fragment.contains_key("type")
    }

    /// The collected keywords, as a fragment
    pub fn to_fragment(&self) -> JsonObject {
        self.extra.to_object()
    }
}

impl SchemaStrategy for TypelessStrategy {
    fn merge_fragment(&mut self, fragment: &JsonObject) -> Result<()> {
        self.extra.absorb(fragment, &[]);
        Ok(())
    }

    fn merge_instance(&mut self, _value: &JsonValue) -> Result<()> {
        Ok(())
    }

    fn to_json(&self) -> JsonObject {
        self.extra.to_object()
    }

    fn to_struct(&self, opts: &RenderOptions<'_>, field_name: Option<&str>) -> JsonValue {
        leaf_struct(JsonType::Null, opts, field_name)
    }

    fn ddl_type(&self, opts: &RenderOptions<'_>) -> String {
        JsonType::Null.tag(opts.dialect).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dialect;
    use serde_json::json;

    fn fragment(value: JsonValue) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_number_widens_on_float() {
        let mut s = ScalarStrategy::new(JsonType::Integer);
        s.merge_instance(&json!(1)).unwrap();
        assert_eq!(s.json_type(), JsonType::Integer);
        s.merge_instance(&json!(1.5)).unwrap();
        assert_eq!(s.json_type(), JsonType::Number);
        s.merge_instance(&json!(2)).unwrap();
        assert_eq!(s.json_type(), JsonType::Number);
    }

    #[test]
    fn test_number_widens_on_fragment() {
        let mut s = ScalarStrategy::new(JsonType::Integer);
        s.merge_fragment(&fragment(json!({"type": "number"}))).unwrap();
        assert_eq!(s.json_type(), JsonType::Number);
    }

    #[test]
    fn test_extra_keywords_first_wins() {
        let mut s = ScalarStrategy::new(JsonType::String);
        s.merge_fragment(&fragment(json!({"type": "string", "maxLength": 5})))
            .unwrap();
        s.merge_fragment(&fragment(json!({"type": "string", "maxLength": 7})))
            .unwrap();
        assert_eq!(
            JsonValue::Object(s.to_json()),
            json!({"maxLength": 5, "type": "string"})
        );
    }

    #[test]
    fn test_leaf_struct_named_and_bare() {
        let opts = RenderOptions::new(Dialect::Spark);
        let s = ScalarStrategy::new(JsonType::Integer);
        assert_eq!(
            s.to_struct(&opts, Some("id")),
            json!({"name": "id", "type": "long", "nullable": true, "metadata": {}})
        );
        assert_eq!(s.to_struct(&opts, None), json!("long"));
    }

    #[test]
    fn test_leaf_ddl() {
        let opts = RenderOptions::new(Dialect::Ddl);
        let s = ScalarStrategy::new(JsonType::Integer);
        assert_eq!(s.render(&opts, Some("id")).as_ddl(), Some("id:bigint"));
        assert_eq!(s.render(&opts, None).as_ddl(), Some("bigint"));
    }

    #[test]
    fn test_typeless_collects_everything() {
        let mut t = TypelessStrategy::new();
        t.merge_fragment(&fragment(json!({"description": "free-form"})))
            .unwrap();
        assert!(TypelessStrategy::matches_fragment(&fragment(json!({}))));
        assert!(!TypelessStrategy::matches_fragment(&fragment(
            json!({"type": "string"})
        )));
        assert_eq!(t.to_fragment(), fragment(json!({"description": "free-form"})));
    }
}
