//! Errors for query execution.

use thiserror::Error;

/// A type for execution errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to acquire a connection: {0}")]
    Acquire(#[source] sqlx::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("unable to decode row: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("column '{column}' has unsupported type '{type_name}'")]
    UnsupportedColumnType { column: String, type_name: String },
    #[error("column '{column}' appears more than once in the result")]
    DuplicateColumn { column: String },
    #[error("column '{column}' holds {value}, which has no JSON representation")]
    NonFiniteFloat { column: String, value: f64 },
}
