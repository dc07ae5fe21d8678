//! Access/refresh token pairs built on two independent signers.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use shopfront_core::config::AuthConfig;
use shopfront_core::error::AppError;
use shopfront_core::result::AppResult;
use shopfront_entity::user::User;

use super::claims::TokenPayload;
use super::signer::Signer;

/// Result of a successful token pair generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Issues, verifies and rotates token pairs.
///
/// Access and refresh tokens are signed with different secrets, so one kind
/// never verifies as the other.
#[derive(Debug, Clone)]
pub struct TokenService {
    access: Signer,
    refresh: Signer,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    /// Creates a token service from auth configuration.
    ///
    /// Lifetimes that do not fit a `Duration` are a configuration error.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        let access_ttl = i64::try_from(config.access_ttl_minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .ok_or_else(|| AppError::configuration("access_ttl_minutes is out of range"))?;
        let refresh_ttl = i64::try_from(config.refresh_ttl_days)
            .ok()
            .and_then(Duration::try_days)
            .ok_or_else(|| AppError::configuration("refresh_ttl_days is out of range"))?;

        Ok(Self::with_ttls(
            &config.access_secret,
            &config.refresh_secret,
            access_ttl,
            refresh_ttl,
        ))
    }

    /// Creates a token service with explicit secrets and lifetimes.
    pub fn with_ttls(
        access_secret: &str,
        refresh_secret: &str,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access: Signer::new(access_secret),
            refresh: Signer::new(refresh_secret),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Lifetime of refresh tokens, used to size the refresh cookie.
    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Issues a fresh pair for the given user.
    pub fn issue_pair(&self, user: &User) -> AppResult<TokenPair> {
        self.issue_pair_for(&TokenPayload::from(user))
    }

    /// Issues a fresh pair carrying `payload`.
    pub fn issue_pair_for(&self, payload: &TokenPayload) -> AppResult<TokenPair> {
        let access = self.access.sign(payload, self.access_ttl)?;
        let refresh = self.refresh.sign(payload, self.refresh_ttl)?;

        Ok(TokenPair {
            access_token: access.token,
            refresh_token: refresh.token,
            access_expires_at: access.expires_at,
            refresh_expires_at: refresh.expires_at,
        })
    }

    /// Verifies an access token.
    pub fn verify_access(&self, token: &str) -> AppResult<TokenPayload> {
        self.access.verify(token)
    }

    /// Verifies a refresh token.
    pub fn verify_refresh(&self, token: &str) -> AppResult<TokenPayload> {
        self.refresh.verify(token)
    }

    /// Exchanges a valid refresh token for a new pair with the same payload.
    pub fn rotate(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let payload = self.verify_refresh(refresh_token)?;
        debug!(email = %payload.email, role = %payload.role, "Rotating token pair");
        self.issue_pair_for(&payload)
    }
}
