//! Builder configuration
//!
//! Settings that shape how a merged schema is rendered. Loadable from
//! YAML or JSON files.

use crate::error::{Error, Result};
use crate::types::Dialect;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default `$schema` URI emitted at the root of JSON Schema output
pub const DEFAULT_SCHEMA_URI: &str = "http://json-schema.org/schema#";

/// Default record name for Avro roots
pub const DEFAULT_ROOT_NAME: &str = "DynamicRecord";

/// Default namespace for Avro roots
pub const DEFAULT_ROOT_NAMESPACE: &str = "root";

/// Configuration for a [`SchemaBuilder`](crate::schema::SchemaBuilder)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Dialect used by `to_schema`
    pub dialect: Dialect,

    /// `$schema` URI for JSON Schema output (`None` omits the keyword)
    pub schema_uri: Option<String>,

    /// Whether `schema_uri` wins over a `$schema` found in added fragments
    pub pin_schema_uri: bool,

    /// Record name synthesized for unnamed Avro records
    pub root_name: String,

    /// Namespace synthesized for unnamed Avro records
    pub root_namespace: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            schema_uri: Some(DEFAULT_SCHEMA_URI.to_string()),
            pin_schema_uri: false,
            root_name: DEFAULT_ROOT_NAME.to_string(),
            root_namespace: DEFAULT_ROOT_NAMESPACE.to_string(),
        }
    }
}

impl BuilderConfig {
    /// Create a config for the given dialect with default settings
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    /// Set the `$schema` URI
    #[must_use]
    pub fn with_schema_uri(mut self, uri: Option<&str>) -> Self {
        self.schema_uri = uri.map(str::to_string);
        self
    }

    /// Pin the `$schema` URI so fragments cannot override it
    #[must_use]
    pub fn with_pinned_schema_uri(mut self, pinned: bool) -> Self {
        self.pin_schema_uri = pinned;
        self
    }

    /// Set the Avro root record name and namespace
    #[must_use]
    pub fn with_root(mut self, name: &str, namespace: &str) -> Self {
        self.root_name = name.to_string();
        self.root_namespace = namespace.to_string();
        self
    }

    /// Load a config from a YAML or JSON file, picked by extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            }
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            let config: Self = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Parse a config from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.root_name.is_empty() {
            return Err(Error::config("root_name cannot be empty"));
        }
        Ok(())
    }
}
