//! Error handling for the validation library
//!
//! Format predicates never fail: they answer `true` or `false`. Errors in
//! this module are reserved for misuse of the schema registry, where a
//! caller hands over a name or definition that cannot be registered.

use thiserror::Error;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Enum representing different validation error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Schema name is missing or empty
    #[error("Invalid schema name: {0}")]
    InvalidName(String),

    /// Input type is incorrect
    #[error("Invalid type: {0}")]
    InvalidType(String),

    /// Regular expression failed to compile
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// Schema validation error
    #[error("Schema validation failed: {0}")]
    SchemaError(String),

    /// Generic validation error
    #[error("{0}")]
    Generic(String),
}

impl ValidationError {
    /// Create a new generic validation error with a message
    pub fn new<S: Into<String>>(message: S) -> Self {
        ValidationError::Generic(message.into())
    }

    /// Returns true if this error was caused by how the registry was called
    /// rather than by the data being validated
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            ValidationError::InvalidName(_) | ValidationError::InvalidType(_)
        )
    }
}

impl From<regex::Error> for ValidationError {
    fn from(err: regex::Error) -> Self {
        ValidationError::InvalidPattern(err.to_string())
    }
}
