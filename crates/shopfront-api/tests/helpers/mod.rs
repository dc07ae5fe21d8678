//! Shared helpers for HTTP-level tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use shopfront_api::{AppState, build_router};
use shopfront_auth::{MemoryCredentialStore, PasswordHasher};
use shopfront_core::config::AppConfig;
use shopfront_entity::user::{User, UserRole, UserStatus};

/// Router over an in-memory store.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: MemoryCredentialStore,
    pub hasher: Arc<PasswordHasher>,
}

/// Decoded response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub set_cookie: Option<String>,
}

impl TestResponse {
    /// Value of the refresh cookie set by this response, if any.
    pub fn refresh_cookie(&self) -> Option<String> {
        let header = self.set_cookie.as_deref()?;
        let pair = header.split(';').next()?;
        pair.strip_prefix("refreshToken=").map(str::to_string)
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.access_secret = "test-access-secret".to_string();
    config.auth.refresh_secret = "test-refresh-secret".to_string();
    config
}

impl TestApp {
    pub fn new() -> Self {
        let store = MemoryCredentialStore::new();
        let hasher = Arc::new(PasswordHasher::new());
        let state =
            AppState::new(test_config(), Arc::new(store.clone()), Arc::clone(&hasher)).unwrap();
        let router = build_router(state.clone());

        Self {
            router,
            state,
            store,
            hasher,
        }
    }

    pub fn create_user(&self, email: &str, password: &str, role: UserRole) {
        let hash = self.hasher.hash(password).unwrap();
        self.store.insert(User::new(email, hash, role));
    }

    pub fn create_user_with_status(&self, email: &str, password: &str, status: UserStatus) {
        let hash = self.hasher.hash(password).unwrap();
        let mut user = User::new(email, hash, UserRole::User);
        user.status = status;
        self.store.insert(user);
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.post(
            "/api/v1/auth/login",
            Some(serde_json::json!({ "email": email, "password": password })),
            None,
            None,
        )
        .await
    }

    pub async fn post(
        &self,
        path: &str,
        body: Option<Value>,
        bearer: Option<&str>,
        cookie: Option<&str>,
    ) -> TestResponse {
        send(self.router.clone(), "POST", path, body, bearer, cookie).await
    }
}

/// Sends one request through `router`.
pub async fn send(
    router: Router,
    method: &str,
    path: &str,
    body: Option<Value>,
    bearer: Option<&str>,
    cookie: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = bearer {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }

    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let headers = response.headers().clone();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        headers,
        body,
        set_cookie,
    }
}
