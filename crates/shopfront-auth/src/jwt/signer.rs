//! HS256 token signing and verification bound to a single secret.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use shopfront_core::error::{AppError, ErrorKind};
use shopfront_core::result::AppResult;

use super::claims::{Claims, TokenPayload};

/// A freshly signed token with its temporal bounds.
#[derive(Debug, Clone)]
pub struct SignedToken {
    /// Compact JWS string.
    pub token: String,
    /// When the token stops verifying.
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies compact tokens with one HMAC secret.
///
/// Holds only immutable key material, so a single instance can be shared
/// across any number of concurrent requests.
#[derive(Clone)]
pub struct Signer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}

impl Signer {
    /// Creates a signer for the given secret.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Expiry is exact; a token is dead the second after `exp`.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Signs `payload` so that it expires `ttl` from now.
    ///
    /// Fails with `Internal` when `now + ttl` is not a representable instant.
    pub fn sign(&self, payload: &TokenPayload, ttl: Duration) -> AppResult<SignedToken> {
        let issued_at = Utc::now();
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::internal("Token expiry out of range"))?;
        let claims = Claims::new(payload, issued_at, expires_at);

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to sign token", e)
            })?;

        Ok(SignedToken { token, expires_at })
    }

    /// Verifies signature and expiry, returning the embedded payload.
    ///
    /// The signature is checked before expiry, so a forged token is always
    /// reported as invalid even when its claimed `exp` is in the past.
    pub fn verify(&self, token: &str) -> AppResult<TokenPayload> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                JwtErrorKind::ExpiredSignature => AppError::expired_token(),
                JwtErrorKind::InvalidSignature => {
                    AppError::invalid_token("Invalid token signature")
                }
                _ => AppError::invalid_token("Invalid token format"),
            }
        })?;

        Ok(data.claims.into_payload())
    }
}
