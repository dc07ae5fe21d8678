//! Argon2id password hashing and verification.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use tracing::warn;

use shopfront_core::error::{AppError, ErrorKind};
use shopfront_core::result::AppResult;

/// Hashes and verifies passwords with Argon2id and a random salt per hash.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    /// Hash checked when no user matches, so unknown emails cost as much
    /// time as wrong passwords.
    decoy_hash: Option<String>,
}

impl PasswordHasher {
    /// Creates a hasher with the default Argon2id parameters.
    pub fn new() -> Self {
        let mut hasher = Self {
            argon2: Argon2::default(),
            decoy_hash: None,
        };
        hasher.decoy_hash = hasher.hash("shopfront-decoy-password").ok();
        hasher
    }

    /// Hashes a plaintext password into a PHC string.
    pub fn hash(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    /// Checks a plaintext password against a stored hash.
    ///
    /// A stored hash that cannot be parsed never matches.
    pub fn verify(&self, password: &str, stored_hash: &str) -> AppResult<bool> {
        let parsed = match PasswordHash::new(stored_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Stored password hash is unreadable");
                return Ok(false);
            }
        };

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::new(
                ErrorKind::Internal,
                format!("Password verification failed: {e}"),
            )),
        }
    }

    /// Spends one verification on the decoy hash. Always returns `false`.
    pub fn verify_decoy(&self, password: &str) -> bool {
        if let Some(decoy) = &self.decoy_hash {
            let _ = self.verify(password, decoy);
        }
        false
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
