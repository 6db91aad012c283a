//! Error taxonomy.
//!
//! Entity-level errors ([`EntityError`]) are recovered at the comparator and
//! recorded in the verdict. Everything else aborts the run.

use crate::store::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which snapshot a document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// A required field is missing or has the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{side} document: {field}: {detail}")]
pub struct StructuralError {
    pub side: Side,
    pub field: String,
    pub detail: String,
}

impl StructuralError {
    pub fn new(side: Side, field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            side,
            field: field.into(),
            detail: detail.into(),
        }
    }

    pub fn missing(side: Side, field: impl Into<String>) -> Self {
        Self::new(side, field, "missing")
    }
}

/// Failure confined to one entity.
#[derive(Debug, Error)]
pub enum EntityError {
    #[error("{side} store: {source}")]
    Adapter {
        side: Side,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    Structural(#[from] StructuralError),
}

impl EntityError {
    pub fn adapter(side: Side, source: StoreError) -> Self {
        Self::Adapter { side, source }
    }
}

/// Caller contract violation on the reconciler or the assembler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid argument `{argument}`: expected {expected}, got {actual}")]
pub struct ConfigurationError {
    pub argument: String,
    pub expected: String,
    pub actual: String,
}

impl ConfigurationError {
    pub fn new(
        argument: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            argument: argument.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

#[derive(Debug, Error)]
#[error("ConfigError: {0}")]
pub struct ConfigError(pub String);

/// Run-fatal errors.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("failed to list store '{store}': {source}")]
    Store {
        store: String,
        #[source]
        source: StoreError,
    },

    #[error("comparison worker failed: {0}")]
    Worker(String),
}

pub type ReconcileResult<T> = Result<T, ReconcileError>;
