//! # Gateway Service
//!
//! Router construction and request handlers. One verification endpoint
//! (POST only, JSON in and out), challenge issuance, and a health probe.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;
use tower_http::trace::TraceLayer;
use tracing::warn;

use ton_proof::domain::entities::ClientMeta;
use ton_proof::{ConnectAuthorization, ConnectRequest, ProofVerificationService};

use crate::domain::error::ApiError;

/// Number of random bytes in an issued challenge payload.
const PAYLOAD_BYTES: usize = 16;

/// Shared state for the handlers.
#[derive(Clone)]
pub struct AppState {
    /// The verification core.
    pub service: Arc<ProofVerificationService>,
}

/// Build the gateway router.
pub fn build_router(service: Arc<ProofVerificationService>) -> Router {
    let state = AppState { service };

    Router::new()
        .route(
            "/ton-connect/verify",
            post(verify_connect).fallback(method_not_allowed),
        )
        .route(
            "/ton-connect/payload",
            post(issue_payload).fallback(method_not_allowed),
        )
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle a wallet-connect verification attempt.
async fn verify_connect(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<ConnectAuthorization>, ApiError> {
    let request: ConnectRequest = serde_json::from_str(&body).map_err(|e| {
        warn!(error = %e, "unparseable connect request body");
        ApiError::bad_request(format!("invalid JSON body: {e}"))
    })?;

    let client = client_meta(&headers);
    let authorization = state.service.handle_connect(&request, &client).await?;
    Ok(Json(authorization))
}

/// Issue a fresh challenge payload for a wallet to sign. Stateless: the
/// verification path treats the payload as an opaque blob.
async fn issue_payload() -> Json<serde_json::Value> {
    let mut bytes = [0u8; PAYLOAD_BYTES];
    OsRng.fill_bytes(&mut bytes);
    Json(serde_json::json!({ "payload": URL_SAFE_NO_PAD.encode(bytes) }))
}

/// JSON 405 for any verb other than the accepted one.
async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "connect-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Best-effort client metadata. A forwarded-for chain wins over the
/// platform connecting-IP header; absence of both leaves the field unset.
fn client_meta(headers: &HeaderMap) -> ClientMeta {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty());

    let ip = forwarded.or_else(|| {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    });

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    ClientMeta { ip, user_agent }
}
