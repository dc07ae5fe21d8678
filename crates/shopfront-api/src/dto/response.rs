//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfront_auth::PublicUser;

/// Response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request fully succeeded.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Payload.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wraps `data` in a successful envelope.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::new(true, message, data)
    }

    /// Envelope with an explicit success flag, for partial outcomes such as
    /// a degraded health report.
    pub fn new(success: bool, message: impl Into<String>, data: T) -> Self {
        Self {
            success,
            message: message.into(),
            data,
        }
    }
}

/// Login result. The refresh token travels in a cookie, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header.
    pub access_token: String,
    /// When the access token stops verifying.
    pub access_expires_at: DateTime<Utc>,
    /// Who logged in.
    pub user: PublicUser,
}

/// Refresh result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// Fresh bearer token.
    pub access_token: String,
    /// When it stops verifying.
    pub access_expires_at: DateTime<Utc>,
}

/// Root banner payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    /// Crate version.
    pub version: String,
    /// Deployment name, e.g. `development`.
    pub environment: String,
    /// Server time.
    pub timestamp: DateTime<Utc>,
}

/// Health report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since startup.
    pub uptime_seconds: u64,
    /// `connected` or `unreachable`.
    pub store: String,
    /// Milliseconds the store health check took.
    pub store_response_ms: u64,
}

/// Body returned for unknown routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotFoundResponse {
    /// Always `false`.
    pub success: bool,
    /// Fixed headline.
    pub message: String,
    /// Which path missed.
    pub error: NotFoundDetail,
}

/// Detail part of [`NotFoundResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotFoundDetail {
    /// Requested path.
    pub path: String,
    /// Fixed explanation.
    pub message: String,
}
