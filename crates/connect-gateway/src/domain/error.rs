//! HTTP error shape: every failure renders as `{"error": <message>}` with
//! an appropriate status code. No stack traces, no internal identifiers.
//!
//! Proof failures deliberately collapse into one generic message so error
//! detail cannot serve as an oracle for iterating on a forged proof; the
//! internal variant is logged where the failure occurs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use ton_proof::service::ConnectError;

/// Message returned for every rejected proof, regardless of cause.
pub const PROOF_REJECTED_MESSAGE: &str = "ton-proof verification failed";

/// Message returned for every server-side failure.
pub const INTERNAL_MESSAGE: &str = "internal server error";

/// Caller-facing API error.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status to respond with.
    pub status: StatusCode,
    /// Body message.
    pub message: String,
}

impl ApiError {
    /// 405 for anything but the accepted verb.
    pub fn method_not_allowed() -> Self {
        Self {
            status: StatusCode::METHOD_NOT_ALLOWED,
            message: "Method not allowed".into(),
        }
    }

    /// 400 with a caller-correctable message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// 400 with the collapsed proof-rejection message.
    pub fn proof_rejected() -> Self {
        Self::bad_request(PROOF_REJECTED_MESSAGE)
    }

    /// 500 with a generic message.
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: INTERNAL_MESSAGE.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

impl From<ConnectError> for ApiError {
    fn from(err: ConnectError) -> Self {
        match err {
            // Validation messages are safe to echo (field names, domain
            // values); they help integrators and reveal nothing secret.
            ConnectError::Validation(e) => ApiError::bad_request(e.to_string()),
            // Already logged with its variant at the rejection site.
            ConnectError::Proof(_) => ApiError::proof_rejected(),
            ConnectError::Store(e) => {
                error!(error = %e, "store failure surfaced to caller as 500");
                ApiError::internal()
            }
        }
    }
}
