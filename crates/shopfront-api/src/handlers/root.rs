//! Root banner.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use crate::dto::response::{ApiResponse, RootResponse};
use crate::state::AppState;

/// GET /
pub async fn root(State(state): State<AppState>) -> Json<ApiResponse<RootResponse>> {
    Json(ApiResponse::ok(
        "API Server is running!",
        RootResponse {
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: state.config.server.environment.clone(),
            timestamp: Utc::now(),
        },
    ))
}
