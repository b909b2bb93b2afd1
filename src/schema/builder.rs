//! Schema builder
//!
//! The accumulation session: owns the root node and renders the merged
//! result in the configured dialect.

use super::node::{Resolved, SchemaNode};
use super::render::{field_entry, RenderOptions, Rendered};
use super::strategy::Strategy;
use crate::config::BuilderConfig;
use crate::error::{Error, Result};
use crate::types::{Dialect, JsonValue};
use tracing::debug;

/// Incrementally builds one schema from instances and schema fragments
///
/// # Example
///
/// ```
/// use solidafy_schema::{Dialect, SchemaBuilder};
/// use serde_json::json;
///
/// let mut builder = SchemaBuilder::with_dialect(Dialect::Ddl);
/// builder.add_object(&json!({"id": 1, "tags": ["a"]})).unwrap();
/// assert_eq!(builder.to_schema().to_string(), "id:bigint,tags:array<string>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    config: BuilderConfig,
    /// `$schema` URI seen in added fragments
    schema_uri: Option<String>,
    root: SchemaNode,
}

impl SchemaBuilder {
    /// Create a builder with default settings (JSON Schema output)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder rendering into `dialect`
    pub fn with_dialect(dialect: Dialect) -> Self {
        Self::with_config(BuilderConfig::new(dialect))
    }

    /// Create a builder from a config
    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            config,
            schema_uri: None,
            root: SchemaNode::new(),
        }
    }

    /// Builder configuration
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Root of the schema tree
    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// `$schema` URI emitted with JSON Schema output
    pub fn schema_uri(&self) -> Option<&str> {
        if self.config.pin_schema_uri {
            return self.config.schema_uri.as_deref();
        }
        self.schema_uri
            .as_deref()
            .or(self.config.schema_uri.as_deref())
    }

    /// Merge a JSON Schema fragment
    pub fn add_schema(&mut self, schema: &JsonValue) -> Result<()> {
        let JsonValue::Object(map) = schema else {
            return Err(Error::invalid_fragment(format!(
                "expected a schema object, got {schema}"
            )));
        };

        let mut fragment = map.clone();
        if let Some(uri) = fragment.remove("$schema") {
            if self.schema_uri.is_none() {
                self.schema_uri = uri.as_str().map(str::to_string);
            }
        }
        self.root.add_fragment(&JsonValue::Object(fragment))
    }

    /// Merge a raw data instance
    pub fn add_object(&mut self, value: &JsonValue) -> Result<()> {
        self.root.add_instance(value)
    }

    /// Merge several raw data instances
    pub fn add_objects<'a, I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a JsonValue>,
    {
        let mut count = 0usize;
        for value in values {
            self.add_object(value)?;
            count += 1;
        }
        debug!(count, "Merged instances");
        Ok(())
    }

    /// Merge everything another builder has accumulated
    pub fn add_builder(&mut self, other: &SchemaBuilder) -> Result<()> {
        if self.schema_uri.is_none() {
            self.schema_uri.clone_from(&other.schema_uri);
        }
        self.root.add_fragment(&other.root.to_json())
    }

    /// Render in the configured dialect
    pub fn to_schema(&self) -> Rendered {
        self.to_schema_as(self.config.dialect)
    }

    /// Render in any dialect
    pub fn to_schema_as(&self, dialect: Dialect) -> Rendered {
        let opts = RenderOptions::from_config(&self.config, dialect);
        match self.root.render(&opts, None) {
            Rendered::Schema(JsonValue::Object(body)) if dialect == Dialect::Json => {
                let mut schema = serde_json::Map::new();
                if let Some(uri) = self.schema_uri() {
                    schema.insert("$schema".to_string(), uri.into());
                }
                schema.extend(body);
                Rendered::Schema(JsonValue::Object(schema))
            }
            Rendered::Schema(body)
                if matches!(dialect, Dialect::Avro | Dialect::Spark) && !self.root_is_record() =>
            {
                Rendered::Schema(named_root(&opts, body))
            }
            rendered => rendered,
        }
    }

    fn root_is_record(&self) -> bool {
        matches!(
            self.root.resolve(),
            Resolved::Strategy(Strategy::Object(_))
        )
    }

    /// Serialize the configured rendering
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        self.to_schema().to_string_pretty(pretty)
    }
}

/// Field entry for a non-record root, named like a root record
fn named_root(opts: &RenderOptions<'_>, body: JsonValue) -> JsonValue {
    let mut entry = field_entry(opts.root_name, body);
    if opts.dialect == Dialect::Avro {
        entry["namespace"] = opts.root_namespace.into();
    }
    entry
}

impl PartialEq for SchemaBuilder {
    fn eq(&self, other: &Self) -> bool {
        self.to_schema_as(Dialect::Json) == other.to_schema_as(Dialect::Json)
    }
}
