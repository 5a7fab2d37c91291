//! Error types for the domain layer

use thiserror::Error;

/// Errors raised while interpreting engine payloads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An embedded JSON document (map, monster list) could not be decoded
    #[error("Failed to parse {field}: {message}")]
    EmbeddedJson {
        field: &'static str,
        message: String,
    },

    /// A string did not match any known variant
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Create an embedded JSON error for the named field
    pub fn embedded_json(field: &'static str, err: impl ToString) -> Self {
        Self::EmbeddedJson {
            field,
            message: err.to_string(),
        }
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
