//! Error types for Solidafy Schema
//!
//! This module defines the error hierarchy for the crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// What kind of input failed to find a strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A schema fragment
    Fragment,
    /// A raw data instance
    Instance,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Fragment => write!(f, "schema"),
            InputKind::Instance => write!(f, "object"),
        }
    }
}

/// The main error type for Solidafy Schema
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Merge Errors
    // ============================================================================
    #[error("Could not find matching schema type for {kind}: {value}")]
    NoStrategy { kind: InputKind, value: String },

    #[error("Invalid schema fragment: {message}")]
    InvalidFragment { message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Output error: {message}")]
    Output { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a no-strategy error for a fragment
    pub fn no_fragment_strategy(value: &impl std::fmt::Display) -> Self {
        Self::NoStrategy {
            kind: InputKind::Fragment,
            value: value.to_string(),
        }
    }

    /// Create a no-strategy error for an instance
    pub fn no_instance_strategy(value: &impl std::fmt::Display) -> Self {
        Self::NoStrategy {
            kind: InputKind::Instance,
            value: value.to_string(),
        }
    }

    /// Create an invalid fragment error
    pub fn invalid_fragment(message: impl Into<String>) -> Self {
        Self::InvalidFragment {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Check if this error came from the input rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::NoStrategy { .. } | Error::InvalidFragment { .. } | Error::JsonParse(_)
        )
    }
}

/// Result type alias for Solidafy Schema
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::no_fragment_strategy(&json!({"type": "african swallow"}));
        assert_eq!(
            err.to_string(),
            r#"Could not find matching schema type for schema: {"type":"african swallow"}"#
        );

        let err = Error::no_instance_strategy(&json!(1));
        assert_eq!(
            err.to_string(),
            "Could not find matching schema type for object: 1"
        );
    }

    #[test]
    fn test_is_input_error() {
        assert!(Error::no_instance_strategy(&"x").is_input_error());
        assert!(Error::invalid_fragment("items must be an object").is_input_error());
        assert!(!Error::config("bad").is_input_error());
        assert!(!Error::output("bad").is_input_error());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
