//! Structured error types for configuration resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving configuration.
///
/// Every variant is fatal to the resolving call: callers receive either a
/// fully valid configuration or one of these, never a half-populated object.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field's raw value failed its validator.
    #[error("invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// A derivation rule's structural precondition was violated.
    #[error("schema {schema}: {reason}")]
    Schema { schema: String, reason: String },

    /// A required directory does not exist (or is not a directory).
    #[error("{field}: directory not found: {path}")]
    PathNotFound { field: String, path: PathBuf },

    /// Filesystem failure during resolution or logger setup.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The global tracing subscriber was already installed.
    #[error("logging already initialized")]
    LoggingInit,
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn schema(schema: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Schema {
            schema: schema.into(),
            reason: reason.into(),
        }
    }

    pub fn path_not_found(field: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        ConfigError::PathNotFound {
            field: field.into(),
            path: path.into(),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
