//! Rendering of merged schemas into output dialects

use crate::config::{BuilderConfig, DEFAULT_ROOT_NAME, DEFAULT_ROOT_NAMESPACE};
use crate::types::{Dialect, JsonValue};
use serde_json::json;

/// Options threaded through a render walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions<'a> {
    /// Target dialect
    pub dialect: Dialect,
    /// Name given to unnamed Avro records
    pub root_name: &'a str,
    /// Namespace given to unnamed Avro records
    pub root_namespace: &'a str,
}

impl RenderOptions<'static> {
    /// Options for a dialect with the default root name and namespace
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            root_name: DEFAULT_ROOT_NAME,
            root_namespace: DEFAULT_ROOT_NAMESPACE,
        }
    }
}

impl<'a> RenderOptions<'a> {
    /// Options for a dialect, taking root naming from a builder config
    pub fn from_config(config: &'a BuilderConfig, dialect: Dialect) -> Self {
        Self {
            dialect,
            root_name: &config.root_name,
            root_namespace: &config.root_namespace,
        }
    }
}

/// A rendered schema: structured for most dialects, text for DDL
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// JSON Schema, Avro or Spark output
    Schema(JsonValue),
    /// DDL declaration
    Ddl(String),
}

impl Rendered {
    /// Structured output, if any
    pub fn as_schema(&self) -> Option<&JsonValue> {
        match self {
            Rendered::Schema(value) => Some(value),
            Rendered::Ddl(_) => None,
        }
    }

    /// DDL text, if any
    pub fn as_ddl(&self) -> Option<&str> {
        match self {
            Rendered::Schema(_) => None,
            Rendered::Ddl(text) => Some(text),
        }
    }

    /// Convert to a JSON value (DDL text becomes a JSON string)
    pub fn into_value(self) -> JsonValue {
        match self {
            Rendered::Schema(value) => value,
            Rendered::Ddl(text) => JsonValue::String(text),
        }
    }

    /// Serialize for display, optionally pretty-printed
    pub fn to_string_pretty(&self, pretty: bool) -> crate::Result<String> {
        match self {
            Rendered::Schema(value) if pretty => Ok(serde_json::to_string_pretty(value)?),
            Rendered::Schema(value) => Ok(serde_json::to_string(value)?),
            Rendered::Ddl(text) => Ok(text.clone()),
        }
    }
}

impl std::fmt::Display for Rendered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rendered::Schema(value) => write!(f, "{value}"),
            Rendered::Ddl(text) => write!(f, "{text}"),
        }
    }
}

/// Named field entry shared by the Avro and Spark dialects
pub(crate) fn field_entry(field_name: &str, type_value: JsonValue) -> JsonValue {
    json!({
        "name": field_name,
        "type": type_value,
        "nullable": true,
        "metadata": {},
    })
}

/// Join DDL fragments the way struct field lists are joined
pub(crate) fn ddl_join<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .map(|p| p.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(",")
}
