//! Common types used throughout Solidafy Schema
//!
//! This module contains shared type definitions and type aliases
//! used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Dialect
// ============================================================================

/// Output representation a merged schema is rendered into
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// JSON Schema style nested mapping
    #[default]
    Json,
    /// Avro-style records with explicit names and namespaces
    Avro,
    /// Spark `StructType` JSON
    Spark,
    /// Flat `name:type` declarations
    Ddl,
}

impl Dialect {
    /// All dialects, in declaration order
    pub const ALL: [Dialect; 4] = [Dialect::Json, Dialect::Avro, Dialect::Spark, Dialect::Ddl];

    /// Whether this dialect renders to text instead of a structured value
    pub fn is_textual(self) -> bool {
        matches!(self, Dialect::Ddl)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Json => write!(f, "json"),
            Dialect::Avro => write!(f, "avro"),
            Dialect::Spark => write!(f, "spark"),
            Dialect::Ddl => write!(f, "ddl"),
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" | "jsonschema" => Ok(Dialect::Json),
            "avro" => Ok(Dialect::Avro),
            "spark" => Ok(Dialect::Spark),
            "ddl" => Ok(Dialect::Ddl),
            other => Err(crate::Error::config(format!("unknown dialect '{other}'"))),
        }
    }
}
