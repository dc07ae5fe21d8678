//! CORS layer configuration.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, Any, CorsLayer};

use shopfront_core::config::CorsConfig;

/// Builds a CORS layer from configuration.
///
/// With credentials enabled a `*` entry mirrors the request instead of
/// answering with a wildcard, which browsers reject.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let wildcard = |list: &[String]| list.iter().any(|v| v == "*");

    let mut layer = CorsLayer::new()
        .allow_methods(
            config
                .allowed_methods
                .iter()
                .filter_map(|m| m.parse::<Method>().ok())
                .collect::<Vec<_>>(),
        )
        .max_age(Duration::from_secs(config.max_age_seconds));

    layer = match (wildcard(&config.allowed_origins), config.allow_credentials) {
        (true, true) => layer.allow_origin(AllowOrigin::mirror_request()),
        (true, false) => layer.allow_origin(Any),
        (false, _) => layer.allow_origin(
            config
                .allowed_origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok())
                .collect::<Vec<_>>(),
        ),
    };

    layer = match (wildcard(&config.allowed_headers), config.allow_credentials) {
        (true, true) => layer.allow_headers(AllowHeaders::mirror_request()),
        (true, false) => layer.allow_headers(Any),
        (false, _) => layer.allow_headers(
            config
                .allowed_headers
                .iter()
                .filter_map(|h| h.parse::<HeaderName>().ok())
                .collect::<Vec<_>>(),
        ),
    };

    layer.allow_credentials(config.allow_credentials)
}
