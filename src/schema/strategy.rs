//! Strategy abstraction shared by every schema node
//!
//! A strategy owns the merge-and-render policy for one shape of data.
//! The set of strategies is closed: [`Strategy`] enumerates them and
//! [`StrategyKind::REGISTRY`] fixes the order in which they are probed.

use super::array::{ListStrategy, TupleStrategy};
use super::object::ObjectStrategy;
use super::render::{RenderOptions, Rendered};
use super::scalar::{ScalarStrategy, TypelessStrategy};
use super::types::JsonType;
use crate::error::Result;
use crate::types::{Dialect, JsonObject, JsonValue};
use tracing::warn;

// ============================================================================
// Strategy Trait
// ============================================================================

/// Merge-and-render behavior implemented by every strategy
///
/// The static shape predicates live on each strategy type as associated
/// functions and are reached through [`StrategyKind`].
pub trait SchemaStrategy {
    /// Absorb one schema fragment
    fn merge_fragment(&mut self, fragment: &JsonObject) -> Result<()>;

    /// Absorb one raw data instance
    fn merge_instance(&mut self, value: &JsonValue) -> Result<()>;

    /// JSON Schema rendering
    fn to_json(&self) -> JsonObject;

    /// Avro or Spark rendering
    fn to_struct(&self, opts: &RenderOptions<'_>, field_name: Option<&str>) -> JsonValue;

    /// DDL type expression (`bigint`, `array<...>`, `struct<...>`)
    fn ddl_type(&self, opts: &RenderOptions<'_>) -> String;

    /// DDL rendering when there is no enclosing field name
    fn ddl_root(&self, opts: &RenderOptions<'_>) -> String {
        self.ddl_type(opts)
    }

    /// Render into the dialect selected by `opts`
    fn render(&self, opts: &RenderOptions<'_>, field_name: Option<&str>) -> Rendered {
        match opts.dialect {
            Dialect::Json => Rendered::Schema(JsonValue::Object(self.to_json())),
            Dialect::Avro | Dialect::Spark => Rendered::Schema(self.to_struct(opts, field_name)),
            Dialect::Ddl => Rendered::Ddl(match field_name {
                Some(name) => format!("{name}:{}", self.ddl_type(opts)),
                None => self.ddl_root(opts),
            }),
        }
    }
}

// ============================================================================
// Extra Keywords
// ============================================================================

/// Fragment keywords a strategy does not interpret itself
///
/// The first value seen for a keyword wins; conflicting later values are
/// dropped with a warning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtraKeywords(JsonObject);

impl ExtraKeywords {
    /// Record every keyword of `fragment` not listed in `consumed`
    pub fn absorb(&mut self, fragment: &JsonObject, consumed: &[&str]) {
        for (keyword, value) in fragment {
            if !consumed.contains(&keyword.as_str()) {
                self.keep(keyword, value);
            }
        }
    }

    fn keep(&mut self, keyword: &str, value: &JsonValue) {
        match self.0.get(keyword) {
            None => {
                self.0.insert(keyword.to_string(), value.clone());
            }
            Some(existing) if existing != value => {
                warn!(
                    keyword = %keyword,
                    kept = %existing,
                    ignored = %value,
                    "Schema incompatible, keyword has conflicting values"
                );
            }
            Some(_) => {}
        }
    }

    /// Get a recorded keyword value
    pub fn get(&self, keyword: &str) -> Option<&JsonValue> {
        self.0.get(keyword)
    }

    /// Check if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy the recorded keywords into a new schema object
    pub fn to_object(&self) -> JsonObject {
        self.0.clone()
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Discriminant of the typed strategies, in probe order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Null,
    Boolean,
    Number,
    String,
    List,
    Tuple,
    Object,
}

impl StrategyKind {
    /// Probe order used when a node has no matching active strategy
    ///
    /// `List` precedes `Tuple`, so raw arrays become lists unless a tuple
    /// strategy is already active on the node.
    pub const REGISTRY: [StrategyKind; 7] = [
        StrategyKind::Null,
        StrategyKind::Boolean,
        StrategyKind::Number,
        StrategyKind::String,
        StrategyKind::List,
        StrategyKind::Tuple,
        StrategyKind::Object,
    ];

    /// Whether a fragment's shape belongs to this kind
    pub fn matches_fragment(self, fragment: &JsonObject) -> bool {
        match self {
            StrategyKind::Null => has_type(fragment, &["null"]),
            StrategyKind::Boolean => has_type(fragment, &["boolean"]),
            StrategyKind::Number => has_type(fragment, &["integer", "number"]),
            StrategyKind::String => has_type(fragment, &["string"]),
            StrategyKind::List => ListStrategy::matches_fragment(fragment),
            StrategyKind::Tuple => TupleStrategy::matches_fragment(fragment),
            StrategyKind::Object => ObjectStrategy::matches_fragment(fragment),
        }
    }

    /// Whether a raw instance belongs to this kind
    pub fn matches_instance(self, value: &JsonValue) -> bool {
        match self {
            StrategyKind::Null => value.is_null(),
            StrategyKind::Boolean => value.is_boolean(),
            StrategyKind::Number => value.is_number(),
            StrategyKind::String => value.is_string(),
            StrategyKind::List => ListStrategy::matches_instance(value),
            StrategyKind::Tuple => TupleStrategy::matches_instance(value),
            StrategyKind::Object => ObjectStrategy::matches_instance(value),
        }
    }

    /// First registered kind matching a fragment
    pub fn for_fragment(fragment: &JsonObject) -> Option<Self> {
        Self::REGISTRY
            .into_iter()
            .find(|kind| kind.matches_fragment(fragment))
    }

    /// First registered kind matching an instance
    pub fn for_instance(value: &JsonValue) -> Option<Self> {
        Self::REGISTRY
            .into_iter()
            .find(|kind| kind.matches_instance(value))
    }

    /// Create a fresh, empty strategy of this kind
    pub fn create(self) -> Strategy {
        match self {
            StrategyKind::Null => Strategy::Null(ScalarStrategy::new(JsonType::Null)),
            StrategyKind::Boolean => Strategy::Boolean(ScalarStrategy::new(JsonType::Boolean)),
            StrategyKind::Number => Strategy::Number(ScalarStrategy::new(JsonType::Integer)),
            StrategyKind::String => Strategy::String(ScalarStrategy::new(JsonType::String)),
            StrategyKind::List => Strategy::List(ListStrategy::new()),
            StrategyKind::Tuple => Strategy::Tuple(TupleStrategy::new()),
            StrategyKind::Object => Strategy::Object(ObjectStrategy::new()),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StrategyKind::Null => "null",
            StrategyKind::Boolean => "boolean",
            StrategyKind::Number => "number",
            StrategyKind::String => "string",
            StrategyKind::List => "list",
            StrategyKind::Tuple => "tuple",
            StrategyKind::Object => "object",
        };
        write!(f, "{name}")
    }
}

/// Check the fragment's `type` keyword against a set of tags
pub(crate) fn has_type(fragment: &JsonObject, tags: &[&str]) -> bool {
    fragment
        .get("type")
        .and_then(JsonValue::as_str)
        .is_some_and(|t| tags.contains(&t))
}

// ============================================================================
// Strategy
// ============================================================================

/// A strategy held by a schema node
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Keywords from fragments without a `type`, pending a typed strategy
    Typeless(TypelessStrategy),
    Null(ScalarStrategy),
    Boolean(ScalarStrategy),
    Number(ScalarStrategy),
    String(ScalarStrategy),
    List(ListStrategy),
    Tuple(TupleStrategy),
    Object(ObjectStrategy),
}

impl Strategy {
    /// Discriminant, `None` for the typeless placeholder
    pub fn kind(&self) -> Option<StrategyKind> {
        match self {
            Strategy::Typeless(_) => None,
            Strategy::Null(_) => Some(StrategyKind::Null),
            Strategy::Boolean(_) => Some(StrategyKind::Boolean),
            Strategy::Number(_) => Some(StrategyKind::Number),
            Strategy::String(_) => Some(StrategyKind::String),
            Strategy::List(_) => Some(StrategyKind::List),
            Strategy::Tuple(_) => Some(StrategyKind::Tuple),
            Strategy::Object(_) => Some(StrategyKind::Object),
        }
    }

    /// Whether this active strategy accepts the fragment
    pub fn matches_fragment(&self, fragment: &JsonObject) -> bool {
        match self.kind() {
            Some(kind) => kind.matches_fragment(fragment),
            None => TypelessStrategy::matches_fragment(fragment),
        }
    }

    /// Whether this active strategy accepts the instance
    pub fn matches_instance(&self, value: &JsonValue) -> bool {
        self.kind().is_some_and(|kind| kind.matches_instance(value))
    }

    /// Render with default root naming
    pub fn render(&self, dialect: Dialect, field_name: Option<&str>) -> Rendered {
        self.as_dyn().render(&RenderOptions::new(dialect), field_name)
    }

    pub(crate) fn is_placeholder(&self) -> bool {
        matches!(self, Strategy::Typeless(_) | Strategy::Null(_))
    }

    pub(crate) fn as_dyn(&self) -> &dyn SchemaStrategy {
        match self {
            Strategy::Typeless(s) => s,
            Strategy::Null(s) | Strategy::Boolean(s) | Strategy::Number(s) | Strategy::String(s) => {
                s
            }
            Strategy::List(s) => s,
            Strategy::Tuple(s) => s,
            Strategy::Object(s) => s,
        }
    }

    pub(crate) fn as_dyn_mut(&mut self) -> &mut dyn SchemaStrategy {
        match self {
            Strategy::Typeless(s) => s,
            Strategy::Null(s) | Strategy::Boolean(s) | Strategy::Number(s) | Strategy::String(s) => {
                s
            }
            Strategy::List(s) => s,
            Strategy::Tuple(s) => s,
            Strategy::Object(s) => s,
        }
    }
}
