//! HTTP tests for the health endpoint and the 404 fallback.

mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;

use shopfront_api::{AppState, build_router};
use shopfront_auth::{CredentialStore, PasswordHasher};
use shopfront_core::error::AppError;
use shopfront_core::result::AppResult;
use shopfront_entity::user::User;

use helpers::{TestApp, send, test_config};

struct DownStore;

#[async_trait]
impl CredentialStore for DownStore {
    async fn find_by_email(&self, _email: &str) -> AppResult<Option<User>> {
        Err(AppError::database("connection refused"))
    }

    async fn update_password_hash(&self, _email: &str, _hash: &str) -> AppResult<bool> {
        Err(AppError::database("connection refused"))
    }

    async fn health_check(&self) -> AppResult<()> {
        Err(AppError::service_unavailable("connection refused"))
    }
}

fn down_router() -> axum::Router {
    let state =
        AppState::new(test_config(), Arc::new(DownStore), Arc::new(PasswordHasher::new())).unwrap();
    build_router(state)
}

#[tokio::test]
async fn test_health_ok() {
    let app = TestApp::new();
    let res = send(app.router.clone(), "GET", "/health", None, None, None).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["success"], true);
    assert_eq!(res.body["data"]["status"], "ok");
    assert_eq!(res.body["data"]["store"], "connected");
    assert!(res.body["data"]["version"].is_string());
    assert!(res.body["data"]["storeResponseMs"].is_u64());
}

#[tokio::test]
async fn test_health_reports_unreachable_store() {
    let res = send(down_router(), "GET", "/health", None, None, None).await;

    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.body["success"], false);
    assert_eq!(res.body["data"]["status"], "degraded");
    assert_eq!(res.body["data"]["store"], "unreachable");
    assert!(res.body["data"]["storeResponseMs"].is_u64());
}

#[tokio::test]
async fn test_root_banner() {
    let app = TestApp::new();
    let res = send(app.router.clone(), "GET", "/", None, None, None).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["success"], true);
    assert_eq!(res.body["message"], "API Server is running!");
    assert_eq!(res.body["data"]["environment"], "development");
    assert!(res.body["data"]["version"].is_string());
    assert!(res.body["data"]["timestamp"].is_string());
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let app = TestApp::new();

    for path in ["/", "/health", "/api/v1/nope"] {
        let res = send(app.router.clone(), "GET", path, None, None, None).await;
        let header = |name: &str| {
            res.headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        assert_eq!(header("x-content-type-options").as_deref(), Some("nosniff"), "{path}");
        assert_eq!(header("x-frame-options").as_deref(), Some("SAMEORIGIN"), "{path}");
        assert_eq!(header("referrer-policy").as_deref(), Some("no-referrer"), "{path}");
        assert!(header("strict-transport-security").is_some(), "{path}");
        assert!(header("content-security-policy").is_some(), "{path}");
    }

    let res = app
        .post("/api/v1/auth/login", Some(serde_json::json!({})), None, None)
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.headers.get("x-content-type-options").unwrap(),
        "nosniff"
    );
}

#[tokio::test]
async fn test_store_failure_is_not_leaked() {
    let res = send(
        down_router(),
        "POST",
        "/api/v1/auth/login",
        Some(serde_json::json!({ "email": "u@example.com", "password": "p1" })),
        None,
        None,
    )
    .await;

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["error"], "DATABASE_ERROR");
    assert!(!res.body["message"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new();
    let res = send(app.router.clone(), "GET", "/api/v1/nope", None, None, None).await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["success"], false);
    assert_eq!(res.body["message"], "API NOT FOUND!");
    assert_eq!(res.body["error"]["path"], "/api/v1/nope");
}
