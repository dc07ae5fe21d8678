//! Claims carried by every access and refresh token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfront_entity::user::{User, UserRole};

/// Identity data embedded in a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Login email of the holder.
    pub email: String,
    /// Role captured at issuance.
    pub role: UserRole,
}

impl TokenPayload {
    /// Creates a payload from its parts.
    pub fn new(email: impl Into<String>, role: UserRole) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }
}

impl From<&User> for TokenPayload {
    fn from(user: &User) -> Self {
        Self::new(user.email.clone(), user.role)
    }
}

/// Full JWT body: the payload plus temporal claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Login email of the holder.
    pub email: String,
    /// Role captured at issuance.
    pub role: UserRole,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Wraps a payload with its issue and expiry instants.
    pub fn new(payload: &TokenPayload, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            email: payload.email.clone(),
            role: payload.role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Strips the temporal claims.
    pub fn into_payload(self) -> TokenPayload {
        TokenPayload {
            email: self.email,
            role: self.role,
        }
    }
}
