//! Structured error types for configuration loading and log-sink setup.

use serde::Serialize;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error kinds for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    // Source values
    InvalidFormat,

    // Post-merge invariants
    ValidationFailed,

    // Log sink
    NotADirectory,
    WorkingDirectoryUnavailable,
    Io,
}

/// Error raised while resolving configuration or opening the log sink.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid format for {}: {reason}", .key.as_deref().unwrap_or("value"))]
    InvalidFormat { key: Option<String>, reason: String },

    #[error("configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("{}: not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("unable to resolve working directory: {0}")]
    WorkingDirectoryUnavailable(#[source] io::Error),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::InvalidFormat { .. } | ConfigError::Serialize(_) => {
                ErrorKind::InvalidFormat
            }
            ConfigError::ValidationFailed(_) => ErrorKind::ValidationFailed,
            ConfigError::NotADirectory(_) => ErrorKind::NotADirectory,
            ConfigError::WorkingDirectoryUnavailable(_) => ErrorKind::WorkingDirectoryUnavailable,
            ConfigError::Io { .. } => ErrorKind::Io,
        }
    }

    // Convenience constructors

    pub fn invalid_format(reason: impl Into<String>) -> Self {
        ConfigError::InvalidFormat {
            key: None,
            reason: reason.into(),
        }
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        ConfigError::ValidationFailed(reason.into())
    }

    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        ConfigError::Io {
            context: context.into(),
            source,
        }
    }

    /// Attach the settings key or variable name that produced a malformed value.
    pub fn with_key(self, key: &str) -> Self {
        match self {
            ConfigError::InvalidFormat { key: None, reason } => ConfigError::InvalidFormat {
                key: Some(key.to_string()),
                reason,
            },
            other => other,
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
