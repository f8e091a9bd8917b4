//! unhinged-form — the card submission endpoint.
//!
//! A single handler serves every path; behaviour depends only on the
//! method:
//!
//! | Method | Behaviour |
//! |---|---|
//! | OPTIONS | CORS preflight |
//! | POST | decode → validate → store a submission |
//! | GET | health/info |
//! | other | 405 |
//!
//! The pipeline is split into [`decode`], [`validate`], [`client`] (header
//! provenance), [`response`] and [`dispatch`], which wraps the rest in a
//! failure boundary so no fault reaches the transport.

pub mod client;
pub mod decode;
pub mod dispatch;
pub mod error;
pub mod response;
pub mod validate;

use axum::Router;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderMap, Method};

use unhinged_core::AbsentFieldPolicy;
use unhinged_store::SubmissionStore;

pub use dispatch::{FormRequest, dispatch};
pub use error::FormError;
pub use response::Response;

/// Per-process handler state, fixed at startup and shared read-only.
#[derive(Clone)]
pub struct FormState<S> {
    pub store: S,
    /// Include failure details in 500 responses.
    pub debug: bool,
    pub absent_fields: AbsentFieldPolicy,
}

/// Largest request body buffered for decoding.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the router: every path and method goes to [`dispatch`].
///
/// Bodies over [`MAX_BODY_BYTES`] are not rejected by axum; the failed read
/// is handed to [`dispatch`] and answered from there.
pub fn build_router<S: SubmissionStore>(state: FormState<S>) -> Router {
    Router::new()
        .fallback(handle::<S>)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

async fn handle<S: SubmissionStore>(
    State(state): State<FormState<S>>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = body.map_err(|rejection| FormError::Body(rejection.body_text()));
    dispatch(&state, FormRequest { method, headers, body }).await
}
