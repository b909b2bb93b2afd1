//! Record strategy for keyed data
//!
//! Merges explicit properties, regex-routed pattern properties and the set
//! of required property names.

use super::node::SchemaNode;
use super::render::{ddl_join, RenderOptions};
use super::strategy::{has_type, ExtraKeywords, SchemaStrategy};
use crate::error::{Error, Result};
use crate::types::{Dialect, JsonObject, JsonValue};
use regex::Regex;
use serde_json::json;
use std::collections::{BTreeSet, HashMap};
use tracing::warn;

// ============================================================================
// Ordered property map
// ============================================================================

/// Name-to-node map that keeps insertion order
#[derive(Debug, Clone, Default)]
struct PropertyMap {
    entries: Vec<(String, SchemaNode)>,
    index: HashMap<String, usize>,
}

impl PropertyMap {
    fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    /// Position of `name`, inserting an empty node if it is new
    fn get_or_insert(&mut self, name: &str) -> usize {
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        self.entries.push((name.to_string(), SchemaNode::new()));
        let i = self.entries.len() - 1;
        self.index.insert(name.to_string(), i);
        i
    }

    fn node_mut(&mut self, i: usize) -> &mut SchemaNode {
        &mut self.entries[i].1
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }

    fn to_json(&self) -> JsonObject {
        self.iter()
            .map(|(name, node)| (name.to_string(), node.to_json()))
            .collect()
    }
}

// ============================================================================
// Object
// ============================================================================

/// Strategy for object data and `type: object` fragments
#[derive(Debug, Clone, Default)]
pub struct ObjectStrategy {
    extra: ExtraKeywords,
    properties: PropertyMap,
    pattern_properties: PropertyMap,
    /// Compiled patterns, aligned with `pattern_properties`; `None` if invalid
    patterns: Vec<Option<Regex>>,
    /// `None` until the first observation is merged
    required: Option<BTreeSet<String>>,
    include_empty_required: bool,
}

impl ObjectStrategy {
    const KEYWORDS: &'static [&'static str] =
        &["type", "properties", "patternProperties", "required"];

    /// Create an empty object strategy
    pub fn new() -> Self {
        Self::default()
    }

    /// Fragment declaring `type: object`
    pub fn matches_fragment(fragment: &JsonObject) -> bool {
        has_type(fragment, &["object"])
    }

    /// Any key/value mapping
    pub fn matches_instance(value: &JsonValue) -> bool {
        value.is_object()
    }

    /// Explicit properties in insertion order
    pub fn properties(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.properties.iter()
    }

    /// Get an explicit property
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.get(name)
    }

    /// Pattern properties in insertion order
    pub fn pattern_properties(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.pattern_properties.iter()
    }

    /// Get a pattern property by its pattern string
    pub fn pattern_property(&self, pattern: &str) -> Option<&SchemaNode> {
        self.pattern_properties.get(pattern)
    }

    /// Names common to every merged observation, `None` before any merge
    pub fn required(&self) -> Option<&BTreeSet<String>> {
        self.required.as_ref()
    }

    /// Whether some fragment declared an empty `required` list
    pub fn includes_empty_required(&self) -> bool {
        self.include_empty_required
    }

    /// Required names to emit, if the keyword should be present
    fn emitted_required(&self) -> Option<&BTreeSet<String>> {
        self.required
            .as_ref()
            .filter(|required| !required.is_empty() || self.include_empty_required)
    }

    fn intersect_required(&mut self, incoming: BTreeSet<String>) {
        self.required = Some(match self.required.take() {
            None => incoming,
            Some(current) => current.intersection(&incoming).cloned().collect(),
        });
    }

    fn pattern_slot(&mut self, pattern: &str) -> usize {
        let i = self.pattern_properties.get_or_insert(pattern);
        if i == self.patterns.len() {
            let compiled = match Regex::new(pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!(pattern = %pattern, error = %e, "Invalid patternProperties regex, it will never match");
                    None
                }
            };
            self.patterns.push(compiled);
        }
        i
    }

    /// First pattern, in insertion order, that matches `key`
    fn matching_pattern(&self, key: &str) -> Option<usize> {
        self.patterns
            .iter()
            .position(|re| re.as_ref().is_some_and(|re| re.is_match(key)))
    }

    fn fields(&self, opts: &RenderOptions<'_>) -> Vec<JsonValue> {
        self.properties
            .iter()
            .map(|(name, node)| node.to_struct(opts, Some(name)))
            .collect()
    }

    fn ddl_fields(&self, opts: &RenderOptions<'_>) -> String {
        ddl_join(
            self.properties
                .iter()
                .map(|(name, node)| format!("{name}:{}", node.ddl_type(opts))),
        )
    }
}

impl SchemaStrategy for ObjectStrategy {
    fn merge_fragment(&mut self, fragment: &JsonObject) -> Result<()> {
        self.extra.absorb(fragment, Self::KEYWORDS);

        if let Some(properties) = fragment.get("properties") {
            let properties = properties
                .as_object()
                .ok_or_else(|| Error::invalid_fragment("properties must be an object"))?;
            for (name, subschema) in properties {
                let i = self.properties.get_or_insert(name);
                if !subschema.is_null() {
                    self.properties.node_mut(i).add_fragment(subschema)?;
                }
            }
        }

        if let Some(patterns) = fragment.get("patternProperties") {
            let patterns = patterns
                .as_object()
                .ok_or_else(|| Error::invalid_fragment("patternProperties must be an object"))?;
            for (pattern, subschema) in patterns {
                let i = self.pattern_slot(pattern);
                if !subschema.is_null() {
                    self.pattern_properties.node_mut(i).add_fragment(subschema)?;
                }
            }
        }

        if let Some(required) = fragment.get("required") {
            let required = required
                .as_array()
                .ok_or_else(|| Error::invalid_fragment("required must be a list of names"))?;
            let names = required
                .iter()
                .map(|name| {
                    name.as_str().map(str::to_string).ok_or_else(|| {
                        Error::invalid_fragment(format!("required entry {name} is not a string"))
                    })
                })
                .collect::<Result<BTreeSet<_>>>()?;
            if names.is_empty() {
                self.include_empty_required = true;
            }
            self.intersect_required(names);
        }

        Ok(())
    }

    fn merge_instance(&mut self, value: &JsonValue) -> Result<()> {
        let JsonValue::Object(map) = value else {
            return Ok(());
        };

        let mut seen = BTreeSet::new();
        for (key, subvalue) in map {
            if !self.properties.contains(key) {
                if let Some(i) = self.matching_pattern(key) {
                    // Pattern-routed keys never count towards `required`
                    self.pattern_properties.node_mut(i).add_instance(subvalue)?;
                    continue;
                }
            }
            let i = self.properties.get_or_insert(key);
            self.properties.node_mut(i).add_instance(subvalue)?;
            seen.insert(key.clone());
        }

        self.intersect_required(seen);
        Ok(())
    }

    fn to_json(&self) -> JsonObject {
        let mut schema = self.extra.to_object();
        schema.insert("type".to_string(), "object".into());
        if !self.properties.is_empty() {
            schema.insert(
                "properties".to_string(),
                JsonValue::Object(self.properties.to_json()),
            );
        }
        if !self.pattern_properties.is_empty() {
            schema.insert(
                "patternProperties".to_string(),
                JsonValue::Object(self.pattern_properties.to_json()),
            );
        }
        if let Some(required) = self.emitted_required() {
            schema.insert("required".to_string(), json!(required));
        }
        schema
    }

    fn to_struct(&self, opts: &RenderOptions<'_>, field_name: Option<&str>) -> JsonValue {
        let fields = self.fields(opts);
        match (opts.dialect, field_name) {
            (Dialect::Spark, None) => json!({
                "type": "struct",
                "fields": fields,
            }),
            (Dialect::Spark, Some(name)) => json!({
                "name": name,
                "type": {"type": "struct", "fields": fields},
                "nullable": true,
                "metadata": {},
            }),
            (_, None) => json!({
                "name": opts.root_name,
                "namespace": opts.root_namespace,
                "type": "record",
                "fields": fields,
                "nullable": true,
                "metadata": {},
            }),
            (_, Some(name)) => json!({
                "name": name,
                "type": [{"type": "record", "name": name, "fields": fields}, "null"],
                "nullable": true,
                "metadata": {},
            }),
        }
    }

    fn ddl_type(&self, opts: &RenderOptions<'_>) -> String {
        format!("struct<{}>", self.ddl_fields(opts))
    }

    fn ddl_root(&self, opts: &RenderOptions<'_>) -> String {
        self.ddl_fields(opts)
    }
}
