//! Error types for the submission store.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to connect to database: {0}")]
    Connect(String),

    #[error("insert failed: {0}")]
    Insert(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}
