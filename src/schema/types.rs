//! Schema types

use crate::types::Dialect;
use serde::{Deserialize, Serialize};

/// Leaf JSON Schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Number,
    Integer,
    Boolean,
    Null,
}

impl JsonType {
    /// Parse a leaf JSON Schema `type` keyword value
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "string" => Some(JsonType::String),
            "number" => Some(JsonType::Number),
            "integer" => Some(JsonType::Integer),
            "boolean" => Some(JsonType::Boolean),
            "null" => Some(JsonType::Null),
            _ => None,
        }
    }

    /// Widen `integer` to `number`; other types are unchanged
    pub fn widen(self) -> JsonType {
        match self {
            JsonType::Integer => JsonType::Number,
            other => other,
        }
    }

    /// Type tag used by the given dialect
    pub fn tag(self, dialect: Dialect) -> &'static str {
        match dialect {
            Dialect::Json => self.json_tag(),
            Dialect::Avro | Dialect::Spark => match self {
                JsonType::String => "string",
                JsonType::Number => "double",
                JsonType::Integer => "long",
                JsonType::Boolean => "boolean",
                JsonType::Null => "null",
            },
            Dialect::Ddl => match self {
                JsonType::String => "string",
                JsonType::Number => "double",
                JsonType::Integer => "bigint",
                JsonType::Boolean => "boolean",
                JsonType::Null => "void",
            },
        }
    }

    fn json_tag(self) -> &'static str {
        match self {
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Integer => "integer",
            JsonType::Boolean => "boolean",
            JsonType::Null => "null",
        }
    }
}

impl std::fmt::Display for JsonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.json_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widen_only_touches_integer() {
        assert_eq!(JsonType::Integer.widen(), JsonType::Number);
        assert_eq!(JsonType::Number.widen(), JsonType::Number);
        assert_eq!(JsonType::String.widen(), JsonType::String);
    }

    #[test]
    fn test_composite_tags_are_not_leaves() {
        assert_eq!(JsonType::from_tag("number"), Some(JsonType::Number));
        assert_eq!(JsonType::from_tag("object"), None);
        assert_eq!(JsonType::from_tag("array"), None);
    }

    #[test]
    fn test_dialect_tags() {
        assert_eq!(JsonType::Integer.tag(Dialect::Avro), "long");
        assert_eq!(JsonType::Null.tag(Dialect::Ddl), "void");
        assert_eq!(JsonType::Number.to_string(), "number");
    }
}
