//! Error types for document store operations.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a [`DocumentStore`](super::DocumentStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// No document for this entity.
    #[error("document not found: {id}")]
    NotFound { id: String },

    /// The document exists but is not valid JSON.
    #[error("malformed document {id}: {reason}")]
    Parse { id: String, reason: String },

    /// Reading the underlying medium failed.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// The store source could not be interpreted.
    #[error("invalid store spec '{spec}': {reason}")]
    InvalidSpec { spec: String, reason: String },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    pub fn io(path: impl std::fmt::Display, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            message: err.to_string(),
        }
    }
}
