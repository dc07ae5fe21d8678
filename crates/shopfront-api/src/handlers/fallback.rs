//! Catch-all for unknown routes.

use axum::Json;
use axum::http::{StatusCode, Uri};

use crate::dto::response::{NotFoundDetail, NotFoundResponse};

/// Answers any unmatched path with a JSON 404.
pub async fn not_found(uri: Uri) -> (StatusCode, Json<NotFoundResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            success: false,
            message: "API NOT FOUND!".to_string(),
            error: NotFoundDetail {
                path: uri.path().to_string(),
                message: "Your requested path is not found!".to_string(),
            },
        }),
    )
}
