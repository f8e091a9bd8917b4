//! HTTP responses for every dispatch outcome.
//!
//! | Outcome | Status | Body |
//! |---|---|---|
//! | CORS preflight | 200 | empty |
//! | Validation failure | 400 | `{success:false, errors:[...]}` |
//! | Stored | 200 | `{success:true, message, id}` |
//! | Health | 200 | `{service, status, timestamp, endpoints}` |
//! | Unsupported method | 405 | `{error}` |
//! | Internal failure | 500 | `{success:false, error, details?}` |
//!
//! JSON bodies are rendered through [`axum::Json`], which also sets
//! `content-type: application/json`.

use axum::Json;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_MAX_AGE,
};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Value, json};

pub const SERVICE_NAME: &str = "Unhinged Cards Form Worker";
pub const SUCCESS_MESSAGE: &str = "¡Gracias parcero! Tu contribución ha sido recibida.";
pub const INTERNAL_ERROR: &str = "Internal server error";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// Outcome of one request, before it is handed to axum.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// `None` only for the preflight, which has an empty body.
    pub body: Option<Value>,
}

impl Response {
    fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Some(body),
        }
    }

    fn with_cors(mut self) -> Self {
        self.headers
            .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        self.headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        );
        self.headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        );
        self
    }

    /// Empty 200 answering a CORS preflight.
    pub fn preflight() -> Self {
        let mut response = Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: None,
        }
        .with_cors();
        response
            .headers
            .insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("86400"));
        response
    }

    /// 400 listing every violated rule.
    pub fn validation_failed(errors: Vec<String>) -> Self {
        Self::json(
            StatusCode::BAD_REQUEST,
            json!({ "success": false, "errors": errors }),
        )
    }

    /// 200 confirming a stored submission.
    pub fn stored(id: Option<i64>) -> Self {
        Self::json(
            StatusCode::OK,
            json!({ "success": true, "message": SUCCESS_MESSAGE, "id": id }),
        )
        .with_cors()
    }

    /// 200 describing the service.
    pub fn health(now: DateTime<Utc>) -> Self {
        Self::json(
            StatusCode::OK,
            json!({
                "service": SERVICE_NAME,
                "status": "healthy",
                "timestamp": now.to_rfc3339_opts(SecondsFormat::Millis, true),
                "endpoints": {
                    "POST /": "Submit form data",
                    "GET /": "Health check",
                    "OPTIONS /": "CORS preflight",
                },
            }),
        )
    }

    /// 405 for anything other than OPTIONS, POST or GET.
    pub fn method_not_allowed() -> Self {
        Self::json(
            StatusCode::METHOD_NOT_ALLOWED,
            json!({ "error": METHOD_NOT_ALLOWED }),
        )
    }

    /// 500 with a generic message; `details` is only emitted when given.
    pub fn internal_error(details: Option<String>) -> Self {
        let mut body = json!({ "success": false, "error": INTERNAL_ERROR });
        if let Some(details) = details {
            body["details"] = Value::String(details);
        }
        Self::json(StatusCode::INTERNAL_SERVER_ERROR, body)
    }
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        match self.body {
            Some(body) => (self.status, self.headers, Json(body)).into_response(),
            None => (self.status, self.headers).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::header::CONTENT_TYPE;

    fn body(response: &Response) -> &Value {
        response.body.as_ref().unwrap()
    }

    #[test]
    fn preflight_is_empty_with_four_cors_headers() {
        let r = Response::preflight();
        assert_eq!(r.status, StatusCode::OK);
        assert!(r.body.is_none());
        assert_eq!(r.headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(r.headers[ACCESS_CONTROL_ALLOW_METHODS], "POST, OPTIONS");
        assert_eq!(r.headers[ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
        assert_eq!(r.headers[ACCESS_CONTROL_MAX_AGE], "86400");
        assert_eq!(r.headers.len(), 4);
    }

    #[test]
    fn validation_failure_lists_errors() {
        let r = Response::validation_failed(vec!["a".into(), "b".into()]);
        assert_eq!(r.status, StatusCode::BAD_REQUEST);
        assert!(r.headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        assert_eq!(body(&r), &json!({ "success": false, "errors": ["a", "b"] }));
    }

    #[test]
    fn stored_carries_id_message_and_cors() {
        let r = Response::stored(Some(42));
        assert_eq!(r.status, StatusCode::OK);
        assert_eq!(r.headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(r.headers.get(ACCESS_CONTROL_MAX_AGE).is_none());
        assert_eq!(body(&r)["success"], true);
        assert_eq!(body(&r)["message"], SUCCESS_MESSAGE);
        assert_eq!(body(&r)["id"], 42);
    }

    #[test]
    fn stored_without_id_is_null() {
        assert!(body(&Response::stored(None))["id"].is_null());
    }

    #[test]
    fn health_describes_service() {
        let r = Response::health(Utc::now());
        assert_eq!(r.status, StatusCode::OK);
        let b = body(&r);
        assert_eq!(b["service"], SERVICE_NAME);
        assert_eq!(b["status"], "healthy");
        assert!(b["endpoints"].is_object());
        assert!(b["timestamp"].as_str().unwrap().ends_with('Z'));
        assert!(b.get("success").is_none());
    }

    #[test]
    fn method_not_allowed_body() {
        let r = Response::method_not_allowed();
        assert_eq!(r.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body(&r), &json!({ "error": "Method not allowed" }));
    }

    #[test]
    fn internal_error_details_are_optional() {
        let hidden = Response::internal_error(None);
        assert_eq!(
            body(&hidden),
            &json!({ "success": false, "error": "Internal server error" })
        );

        let shown = Response::internal_error(Some("insert failed: boom".into()));
        assert_eq!(body(&shown)["details"], "insert failed: boom");
        assert_eq!(body(&shown)["error"], INTERNAL_ERROR);
    }

    #[tokio::test]
    async fn json_outcomes_render_with_content_type() {
        let r = Response::stored(Some(7)).into_response();
        assert_eq!(r.status(), StatusCode::OK);
        assert_eq!(r.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(r.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let bytes = to_bytes(r.into_body(), usize::MAX).await.unwrap();
        let rendered: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(rendered["id"], 7);
    }

    #[tokio::test]
    async fn preflight_renders_without_body_or_content_type() {
        let r = Response::preflight().into_response();
        assert_eq!(r.status(), StatusCode::OK);
        assert!(r.headers().get(CONTENT_TYPE).is_none());
        assert_eq!(r.headers()[ACCESS_CONTROL_MAX_AGE], "86400");

        let bytes = to_bytes(r.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }
}
