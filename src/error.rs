// src/error.rs

//! Unified error handling for the marketplace library.

use std::fmt;

use thiserror::Error;

/// Result type alias for marketplace operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A match pattern could not be compiled
    #[error("Pattern error for '{term}': {message}")]
    Pattern { term: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Category tables are inconsistent
    #[error("Taxonomy error: {0}")]
    Taxonomy(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Create a pattern compilation error.
    pub fn pattern(term: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Pattern {
            term: term.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a taxonomy error.
    pub fn taxonomy(message: impl Into<String>) -> Self {
        Self::Taxonomy(message.into())
    }

    /// Create a not-found error.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_error_message() {
        let err = AppError::pattern("c++", "unclosed group");
        assert_eq!(err.to_string(), "Pattern error for 'c++': unclosed group");
    }

    #[test]
    fn test_json_error_converts() {
        let parsed: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: AppError = parsed.unwrap_err().into();
        assert!(matches!(err, AppError::Json(_)));
    }
}
