//! Error types for forum-core

use thiserror::Error;

/// Typed failure returned by value-object constructors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Input was empty or whitespace only
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Input shorter than the configured minimum
    #[error("{field} must be at least {min} characters (got {actual})")]
    TooShort {
        field: &'static str,
        min: usize,
        actual: usize,
    },

    /// Input longer than the configured maximum
    #[error("{field} must be at most {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// Link post payload is not an http(s) URL
    #[error("Invalid URL '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },

    /// Identifier could not be parsed
    #[error("Invalid {kind} id: '{value}'")]
    InvalidId { kind: &'static str, value: String },
}

/// Main error type for forum-core
#[derive(Debug, Error)]
pub enum ForumError {
    /// Value object validation failure
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Comment not found in a post
    #[error("Comment not found: {0}")]
    CommentNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ForumError>,
    },
}

impl ForumError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ForumError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<toml::de::Error> for ForumError {
    fn from(err: toml::de::Error) -> Self {
        ForumError::Toml(err.to_string())
    }
}

/// Result type alias for forum-core
pub type Result<T> = std::result::Result<T, ForumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::TooShort {
            field: "post title",
            min: 2,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "post title must be at least 2 characters (got 1)"
        );
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: ForumError = ValidationError::Empty { field: "comment text" }.into();
        assert!(matches!(err, ForumError::Validation(_)));
        assert_eq!(err.to_string(), "Validation error: comment text cannot be empty");
    }

    #[test]
    fn test_error_with_context() {
        let err = ForumError::CommentNotFound("c1".to_string());
        let err = err.with_context("Failed to apply vote");
        assert!(err.to_string().contains("Failed to apply vote"));
        assert!(err.to_string().contains("c1"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let err: ForumError = toml_err.into();
        assert!(matches!(err, ForumError::Toml(_)));
    }
}
