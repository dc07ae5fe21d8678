//! Maps `AppError` to HTTP responses through the local [`ApiError`] wrapper.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use shopfront_core::error::{AppError, ErrorKind};

/// Message returned in place of internal error details.
const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::MissingToken
        | ErrorKind::InvalidToken
        | ErrorKind::ExpiredToken
        | ErrorKind::InvalidCredentials
        | ErrorKind::PasswordMismatch => StatusCode::UNAUTHORIZED,
        ErrorKind::InsufficientRole | ErrorKind::AccountDisabled => StatusCode::FORBIDDEN,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<&AppError> for ApiErrorResponse {
    fn from(err: &AppError) -> Self {
        let message = if err.kind.is_internal() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            err.message.clone()
        };

        Self {
            success: false,
            error: err.kind.code().to_string(),
            message,
        }
    }
}

/// HTTP-facing error. Every handler, extractor and middleware in this crate
/// fails with it; `?` converts from [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        if err.kind.is_internal() {
            tracing::error!(kind = %err.kind, error = %err.message, source = ?err.source, "Internal error");
        }

        (status_for(err.kind), Json(ApiErrorResponse::from(&err))).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
