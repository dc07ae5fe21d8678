//! Health check handler.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /health
///
/// Answers 503 with `success: false` when the credential store is unreachable.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let started = Instant::now();
    let store_ok = match state.store.health_check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Credential store health check failed");
            false
        }
    };
    let store_response_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let (status, label, store, message) = if store_ok {
        (StatusCode::OK, "ok", "connected", "Server is running")
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "degraded",
            "unreachable",
            "Credential store is unreachable",
        )
    };

    (
        status,
        Json(ApiResponse::new(
            store_ok,
            message,
            HealthResponse {
                status: label.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                uptime_seconds: state.started_at.elapsed().as_secs(),
                store: store.to_string(),
                store_response_ms,
            },
        )),
    )
}
