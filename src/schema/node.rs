//! Schema tree nodes
//!
//! A node owns the strategies active for one position in the schema tree
//! and routes every fragment or instance to exactly one of them.

use super::render::{RenderOptions, Rendered};
use super::scalar::{leaf_struct, TypelessStrategy};
use super::strategy::{Strategy, StrategyKind};
use super::types::JsonType;
use crate::error::{Error, Result};
use crate::types::{Dialect, JsonObject, JsonValue};
use serde_json::json;
use std::collections::BTreeSet;
use tracing::debug;

/// How a node presents itself to the Avro, Spark and DDL dialects
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    /// One typed strategy decides the rendering
    Strategy(&'a Strategy),
    /// The node collapses to a leaf type
    Leaf(JsonType),
}

/// A node in the schema tree
#[derive(Debug, Clone, Default)]
pub struct SchemaNode {
    strategies: Vec<Strategy>,
}

impl SchemaNode {
    /// Create an empty node
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if nothing was merged into this node
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Active strategies in activation order
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Merge a schema fragment
    ///
    /// `anyOf` alternatives and multi-valued `type` keywords are split and
    /// merged one by one.
    pub fn add_fragment(&mut self, fragment: &JsonValue) -> Result<()> {
        let fragment = fragment.as_object().ok_or_else(|| {
            Error::invalid_fragment(format!("expected a schema object, got {fragment}"))
        })?;

        if let Some(any_of) = fragment.get("anyOf") {
            let alternatives = any_of
                .as_array()
                .ok_or_else(|| Error::invalid_fragment("anyOf must be a list of schemas"))?;
            for alternative in alternatives {
                self.add_fragment(alternative)?;
            }
            return Ok(());
        }

        if let Some(JsonValue::Array(types)) = fragment.get("type") {
            for json_type in types {
                let mut single = fragment.clone();
                single.insert("type".to_string(), json_type.clone());
                self.add_fragment(&JsonValue::Object(single))?;
            }
            return Ok(());
        }

        let i = self.strategy_for_fragment(fragment)?;
        self.strategies[i].as_dyn_mut().merge_fragment(fragment)
    }

    /// Merge a raw data instance
    pub fn add_instance(&mut self, value: &JsonValue) -> Result<()> {
        let i = match self.strategies.iter().position(|s| s.matches_instance(value)) {
            Some(i) => i,
            None => {
                let kind = StrategyKind::for_instance(value)
                    .ok_or_else(|| Error::no_instance_strategy(value))?;
                self.activate(kind)?
            }
        };
        self.strategies[i].as_dyn_mut().merge_instance(value)
    }

    fn strategy_for_fragment(&mut self, fragment: &JsonObject) -> Result<usize> {
        if let Some(i) = self.strategies.iter().position(|s| s.matches_fragment(fragment)) {
            return Ok(i);
        }

        if let Some(kind) = StrategyKind::for_fragment(fragment) {
            return self.activate(kind);
        }

        if TypelessStrategy::matches_fragment(fragment) {
            if self.strategies.is_empty() {
                self.strategies
                    .push(Strategy::Typeless(TypelessStrategy::new()));
            }
            return Ok(0);
        }

        Err(Error::no_fragment_strategy(&JsonValue::Object(
            fragment.clone(),
        )))
    }

    /// Append a new strategy, folding in a pending typeless placeholder
    fn activate(&mut self, kind: StrategyKind) -> Result<usize> {
        let mut strategy = kind.create();
        if let Some(Strategy::Typeless(typeless)) = self.strategies.last() {
            let pending = typeless.to_fragment();
            self.strategies.pop();
            strategy.as_dyn_mut().merge_fragment(&pending)?;
        }
        debug!(kind = %kind, "Activated schema strategy");
        self.strategies.push(strategy);
        Ok(self.strategies.len() - 1)
    }

    /// Pick the strategy that drives non-JSON-Schema rendering
    ///
    /// Null is dropped next to another type since every field is nullable.
    /// Several competing types fall back to string.
    pub fn resolve(&self) -> Resolved<'_> {
        let mut typed = self.strategies.iter().filter(|s| !s.is_placeholder());
        match (typed.next(), typed.next()) {
            (Some(strategy), None) => Resolved::Strategy(strategy),
            (None, _) => Resolved::Leaf(JsonType::Null),
            (Some(_), Some(_)) => Resolved::Leaf(JsonType::String),
        }
    }

    /// Render this node, `field_name` being the enclosing property if any
    pub fn render(&self, opts: &RenderOptions<'_>, field_name: Option<&str>) -> Rendered {
        match opts.dialect {
            Dialect::Json => Rendered::Schema(self.to_json()),
            Dialect::Avro | Dialect::Spark => Rendered::Schema(self.to_struct(opts, field_name)),
            Dialect::Ddl => match self.resolve() {
                Resolved::Strategy(strategy) => strategy.as_dyn().render(opts, field_name),
                Resolved::Leaf(json_type) => {
                    let tag = json_type.tag(opts.dialect);
                    Rendered::Ddl(match field_name {
                        Some(name) => format!("{name}:{tag}"),
                        None => tag.to_string(),
                    })
                }
            },
        }
    }

    /// JSON Schema rendering
    ///
    /// Strategies rendering to a bare `{"type": ...}` are collapsed into one
    /// `type` entry; anything richer is listed under `anyOf`.
    pub fn to_json(&self) -> JsonValue {
        let mut types = BTreeSet::new();
        let mut schemas = Vec::new();

        for strategy in &self.strategies {
            let schema = strategy.as_dyn().to_json();
            match (schema.len(), schema.get("type")) {
                (1, Some(JsonValue::String(json_type))) => {
                    types.insert(json_type.clone());
                }
                _ => schemas.push(JsonValue::Object(schema)),
            }
        }

        if !types.is_empty() {
            let json_type = if types.len() == 1 {
                json!(types.pop_first())
            } else {
                json!(types)
            };
            schemas.insert(0, json!({ "type": json_type }));
        }

        match schemas.len() {
            0 => json!({}),
            1 => schemas.remove(0),
            _ => json!({ "anyOf": schemas }),
        }
    }

    pub(crate) fn to_struct(&self, opts: &RenderOptions<'_>, field_name: Option<&str>) -> JsonValue {
        match self.resolve() {
            Resolved::Strategy(strategy) => strategy.as_dyn().to_struct(opts, field_name),
            Resolved::Leaf(json_type) => leaf_struct(json_type, opts, field_name),
        }
    }

    pub(crate) fn ddl_type(&self, opts: &RenderOptions<'_>) -> String {
        match self.resolve() {
            Resolved::Strategy(strategy) => strategy.as_dyn().ddl_type(opts),
            Resolved::Leaf(json_type) => json_type.tag(opts.dialect).to_string(),
        }
    }
}
