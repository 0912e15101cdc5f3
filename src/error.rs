//! Error types for the record store.

use thiserror::Error;

/// Main error type for store operations.
///
/// Only structurally invalid input travels through this type; expected
/// operational outcomes (empty results, rejected merges) are reported
/// through [`crate::OpResult`] instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid column query {0:?} (expected a dotted path like \"a.b.c\")")]
    InvalidColumnQuery(String),

    #[error("column {0:?} is already described")]
    DuplicateColumn(String),

    #[error("merge source read failed: {0}")]
    MergeSource(String),

    #[error("adapter not initialized")]
    NotInitialized,

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
