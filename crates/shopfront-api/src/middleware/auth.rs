//! Role guard applied per route with `from_fn_with_state`.
//!
//! ```ignore
//! Router::new()
//!     .route("/change-password", post(change_password))
//!     .route_layer(from_fn_with_state(
//!         RouteGuard::new(state.tokens.clone(), &[UserRole::SuperAdmin, UserRole::User]),
//!         require_roles,
//!     ));
//! ```

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use shopfront_auth::{RoleSet, TokenService, authorize};
use shopfront_entity::user::UserRole;

use crate::error::ApiError;
use crate::extractors::bearer_token;

/// Token verifier plus the roles a route admits. An empty list admits any
/// authenticated caller.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    tokens: Arc<TokenService>,
    permitted: RoleSet,
}

impl RouteGuard {
    /// Guard admitting `roles`.
    pub fn new(tokens: Arc<TokenService>, roles: &[UserRole]) -> Self {
        Self {
            tokens,
            permitted: RoleSet::of(roles),
        }
    }
}

/// Verifies the bearer token, checks the role and attaches the identity to
/// the request extensions for [`crate::extractors::AuthUser`].
pub async fn require_roles(
    State(guard): State<RouteGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = authorize(&guard.tokens, bearer_token(request.headers()), &guard.permitted)?;
    tracing::debug!(email = %identity.email, role = %identity.role, "Request authorized");

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}
