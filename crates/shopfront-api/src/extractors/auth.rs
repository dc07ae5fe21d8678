//! Bearer token parsing and the `AuthUser` extractor.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use shopfront_auth::{AuthenticatedIdentity, RoleSet, authorize};
use crate::error::ApiError;
use crate::state::AppState;

/// Returns the token of an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively. Any other shape, including an
/// empty token, yields `None`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Authenticated caller available to handlers.
///
/// Routes behind the role guard get the identity the guard attached. Elsewhere
/// the bearer token is verified on the spot with no role restriction.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedIdentity);

impl std::ops::Deref for AuthUser {
    type Target = AuthenticatedIdentity;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<AuthenticatedIdentity>() {
            return Ok(AuthUser(identity.clone()));
        }

        let identity = authorize(&state.tokens, bearer_token(&parts.headers), &RoleSet::any())?;
        Ok(AuthUser(identity))
    }
}
