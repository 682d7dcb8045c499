//! Cache-related error types

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Filesystem operation that failed, for error context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOperation {
    Write,
    Delete,
    List,
}

impl fmt::Display for IoOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IoOperation::Write => "write",
            IoOperation::Delete => "delete",
            IoOperation::List => "list",
        };
        f.write_str(name)
    }
}

/// Cache operation errors
///
/// A missing, expired or corrupt entry is never an error: lookups report those
/// as `None`.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Invalid cache key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("Failed to create cache directory {}: {source}", path.display())]
    DirectoryCreation { path: PathBuf, source: io::Error },

    #[error("IO error on {} ({operation}): {source}", path.display())]
    Io {
        path: PathBuf,
        operation: IoOperation,
        source: io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl CacheError {
    /// Wrap an IO error with the path and operation it came from
    pub fn io(path: impl Into<PathBuf>, operation: IoOperation, source: io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            operation,
            source,
        }
    }

    /// True if the underlying IO error is `NotFound`
    pub fn is_not_found(&self) -> bool {
        match self {
            CacheError::Io { source, .. } | CacheError::DirectoryCreation { source, .. } => {
                source.kind() == io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}

/// Re-export commonly used Result type
pub type Result<T> = std::result::Result<T, CacheError>;
