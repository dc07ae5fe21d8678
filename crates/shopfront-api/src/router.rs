//! Route definitions for the Shopfront HTTP API.
//!
//! Auth routes live under `/api/v1/auth`; `/` and `/health` sit at the root.

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use shopfront_entity::user::UserRole;

use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::middleware::security::security_headers;
use crate::middleware::{RouteGuard, require_roles};
use crate::state::AppState;

/// Builds the complete router with middleware and state applied.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new().nest("/auth", auth_routes(&state));

    let cors = build_cors_layer(&state.config.server.cors);

    let mut router = Router::new()
        .route("/", get(handlers::root::root))
        .nest("/api/v1", api_routes)
        .route("/health", get(handlers::health::health))
        .fallback(handlers::fallback::not_found);

    for layer in security_headers() {
        router = router.layer(layer);
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(from_fn(request_logging))
        .with_state(state)
}

/// Login and refresh are open; change-password needs SUPER_ADMIN or USER.
fn auth_routes(state: &AppState) -> Router<AppState> {
    let guarded = Router::new()
        .route("/change-password", post(handlers::auth::change_password))
        .route_layer(from_fn_with_state(
            RouteGuard::new(
                state.tokens.clone(),
                &[UserRole::SuperAdmin, UserRole::User],
            ),
            require_roles,
        ));

    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/refresh-token", post(handlers::auth::refresh_token))
        .merge(guarded)
}
