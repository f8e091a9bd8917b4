//! Internal failures raised while handling a request.
//!
//! Validation problems are not errors here; they are reported to the
//! caller as a 400 list. Everything in [`FormError`] becomes a 500.

use thiserror::Error;
use unhinged_store::StoreError;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("failed to read request body: {0}")]
    Body(String),

    #[error("malformed JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON body must be an object, got {0}")]
    NotAnObject(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("handler panicked: {0}")]
    Panic(String),
}
