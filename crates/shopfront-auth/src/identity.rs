//! Per-request authenticated identity.

use serde::{Deserialize, Serialize};

use shopfront_entity::user::UserRole;

use crate::jwt::TokenPayload;

/// Who is calling, as proven by a verified access token.
///
/// Built fresh for every request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedIdentity {
    /// Email embedded in the token.
    pub email: String,
    /// Role at the time the token was issued.
    pub role: UserRole,
}

impl From<TokenPayload> for AuthenticatedIdentity {
    fn from(payload: TokenPayload) -> Self {
        Self {
            email: payload.email,
            role: payload.role,
        }
    }
}
