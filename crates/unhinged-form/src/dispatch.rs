//! Method dispatch and the top-level failure boundary.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::body::Bytes;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method};
use chrono::Utc;
use futures_util::FutureExt;
use tracing::{debug, error, info, warn};

use unhinged_store::{SubmissionRecord, SubmissionStore};

use crate::FormState;
use crate::client::client_meta;
use crate::decode::decode_body;
use crate::error::FormError;
use crate::response::Response;
use crate::validate::parse_submission;

/// The parts of an inbound request the endpoint looks at.
///
/// The body is kept as the outcome of reading it, so a body that could not
/// be buffered fails inside the dispatch boundary, and only for POST.
#[derive(Debug)]
pub struct FormRequest {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Result<Bytes, FormError>,
}

/// Handle one request. Never fails: every fault, including a panic in a
/// later stage, becomes the 500 response.
pub async fn dispatch<S: SubmissionStore>(state: &FormState<S>, request: FormRequest) -> Response {
    let outcome = AssertUnwindSafe(route(state, request)).catch_unwind().await;
    let err = match outcome {
        Ok(Ok(response)) => return response,
        Ok(Err(err)) => err,
        Err(payload) => {
            let err = FormError::Panic(panic_message(payload.as_ref()));
            warn!(error = %err, "panic caught at dispatch boundary");
            err
        }
    };

    error!(error = %err, "request failed");
    let details = state.debug.then(|| err.to_string());
    Response::internal_error(details)
}

async fn route<S: SubmissionStore>(
    state: &FormState<S>,
    request: FormRequest,
) -> Result<Response, FormError> {
    match request.method {
        Method::OPTIONS => {
            debug!("CORS preflight");
            Ok(Response::preflight())
        }
        Method::POST => submit(state, &request.headers, &request.body?).await,
        Method::GET => Ok(Response::health(Utc::now())),
        method => {
            debug!(%method, "method not allowed");
            Ok(Response::method_not_allowed())
        }
    }
}

async fn submit<S: SubmissionStore>(
    state: &FormState<S>,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Response, FormError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let fields = decode_body(content_type, body)?;

    let submission = match parse_submission(&fields) {
        Ok(submission) => submission,
        Err(errors) => {
            debug!(count = errors.len(), ?errors, "submission rejected");
            return Ok(Response::validation_failed(errors));
        }
    };

    let client = client_meta(headers);
    let record = SubmissionRecord::new(&submission, &client, state.absent_fields, Utc::now());
    let id = state.store.insert(&record).await?;

    info!(id, tipo_carta = %submission.tipo_carta, "submission stored");
    Ok(Response::stored(Some(id)))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
