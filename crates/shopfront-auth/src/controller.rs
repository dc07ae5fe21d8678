//! Login, refresh and change-password flows.
//!
//! The controller never touches HTTP: it returns token pairs and typed
//! errors, and the API layer decides how they land in cookies and bodies.
//! Argon2 work runs on the blocking pool so slow hashes never stall the
//! async workers.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use shopfront_core::error::{AppError, ErrorKind};
use shopfront_core::result::AppResult;
use shopfront_entity::user::{User, UserRole};

use crate::identity::AuthenticatedIdentity;
use crate::jwt::{TokenPair, TokenService};
use crate::password::PasswordHasher;
use crate::store::CredentialStore;

/// Public part of a user returned after login. Never carries the hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    /// Login email.
    pub email: String,
    /// Current role.
    pub role: UserRole,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Fresh token pair. The refresh half belongs in the cookie.
    pub tokens: TokenPair,
    /// Who logged in.
    pub user: PublicUser,
}

/// Orchestrates credential checks against the store and token issuance.
#[derive(Clone)]
pub struct AuthController {
    tokens: Arc<TokenService>,
    store: Arc<dyn CredentialStore>,
    hasher: Arc<PasswordHasher>,
}

impl std::fmt::Debug for AuthController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthController")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl AuthController {
    /// Creates a controller over the given collaborators.
    pub fn new(
        tokens: Arc<TokenService>,
        store: Arc<dyn CredentialStore>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            tokens,
            store,
            hasher,
        }
    }

    /// Authenticates by email and password and issues a token pair.
    ///
    /// Unknown email and wrong password fail identically. Account status is
    /// only consulted once the password has matched.
    pub async fn login_user(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let Some(user) = self.store.find_by_email(email).await? else {
            let password = password.to_owned();
            self.with_hasher(move |hasher| Ok(hasher.verify_decoy(&password)))
                .await?;
            warn!(email = %email, "Login rejected");
            return Err(AppError::invalid_credentials());
        };

        if !self.verify_password(password, &user.password_hash).await? {
            warn!(email = %email, "Login rejected");
            return Err(AppError::invalid_credentials());
        }

        if !user.can_login() {
            warn!(email = %user.email, status = %user.status, "Login on inactive account");
            return Err(AppError::account_disabled());
        }

        let tokens = self.tokens.issue_pair(&user)?;
        info!(email = %user.email, role = %user.role, "Login successful");

        Ok(LoginOutcome {
            tokens,
            user: PublicUser::from(&user),
        })
    }

    /// Exchanges the refresh cookie value for a new pair.
    pub fn refresh_token(&self, refresh_cookie: Option<&str>) -> AppResult<TokenPair> {
        let token = refresh_cookie
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::missing_token("Refresh token not found"))?;

        let pair = self.tokens.rotate(token)?;
        debug!("Refresh token rotated");
        Ok(pair)
    }

    /// Replaces the caller's password after checking the current one.
    ///
    /// Tokens already issued stay valid until they expire.
    pub async fn change_password(
        &self,
        identity: &AuthenticatedIdentity,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self
            .store
            .find_by_email(&identity.email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !self.verify_password(old_password, &user.password_hash).await? {
            warn!(email = %identity.email, "Password change rejected");
            return Err(AppError::password_mismatch());
        }

        let new_password = new_password.to_owned();
        let new_hash = self
            .with_hasher(move |hasher| hasher.hash(&new_password))
            .await?;
        if !self
            .store
            .update_password_hash(&identity.email, &new_hash)
            .await?
        {
            return Err(AppError::not_found("User not found"));
        }

        info!(email = %identity.email, "Password changed");
        Ok(())
    }

    async fn verify_password(&self, password: &str, stored_hash: &str) -> AppResult<bool> {
        let password = password.to_owned();
        let stored_hash = stored_hash.to_owned();
        self.with_hasher(move |hasher| hasher.verify(&password, &stored_hash))
            .await
    }

    /// Runs `job` against the hasher on tokio's blocking pool.
    async fn with_hasher<T, F>(&self, job: F) -> AppResult<T>
    where
        F: FnOnce(&PasswordHasher) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || job(&hasher))
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Password hashing task failed", e))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shopfront_entity::user::UserStatus;

    use crate::store::MemoryCredentialStore;

    struct Fixture {
        controller: AuthController,
        store: MemoryCredentialStore,
        tokens: Arc<TokenService>,
        hasher: Arc<PasswordHasher>,
    }

    fn fixture() -> Fixture {
        let store = MemoryCredentialStore::new();
        let hasher = Arc::new(PasswordHasher::new());
        let tokens = Arc::new(TokenService::with_ttls(
            "access",
            "refresh",
            Duration::minutes(15),
            Duration::days(7),
        ));
        let controller = AuthController::new(
            Arc::clone(&tokens),
            Arc::new(store.clone()),
            Arc::clone(&hasher),
        );
        Fixture {
            controller,
            store,
            tokens,
            hasher,
        }
    }

    fn add_user(fx: &Fixture, email: &str, password: &str, role: UserRole) {
        let hash = fx.hasher.hash(password).unwrap();
        fx.store.insert(User::new(email, hash, role));
    }

    fn identity(email: &str, role: UserRole) -> AuthenticatedIdentity {
        AuthenticatedIdentity {
            email: email.to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_login_issues_tokens_with_stored_role() {
        let fx = fixture();
        for role in UserRole::ALL {
            let email = format!("{}@example.com", role.as_str().to_lowercase());
            add_user(&fx, &email, "p1", role);

            let outcome = fx.controller.login_user(&email, "p1").await.unwrap();
            assert_eq!(outcome.user, PublicUser { email: email.clone(), role });
            let payload = fx.tokens.verify_access(&outcome.tokens.access_token).unwrap();
            assert_eq!(payload.role, role);
            assert_eq!(payload.email, email);
            assert!(fx.tokens.verify_refresh(&outcome.tokens.refresh_token).is_ok());
        }
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_look_the_same() {
        let fx = fixture();
        add_user(&fx, "u@example.com", "p1", UserRole::User);

        let wrong = fx.controller.login_user("u@example.com", "wrong").await.unwrap_err();
        let unknown = fx.controller.login_user("x@example.com", "p1").await.unwrap_err();
        assert_eq!(wrong.kind, ErrorKind::InvalidCredentials);
        assert_eq!(unknown.kind, ErrorKind::InvalidCredentials);
        assert_eq!(wrong.message, unknown.message);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_logins() {
        let fx = fixture();
        add_user(&fx, "u@example.com", "p1", UserRole::User);

        let attempts: Vec<_> = ["p1", "wrong", "p1", "wrong"]
            .into_iter()
            .map(|password| {
                let controller = fx.controller.clone();
                tokio::spawn(async move { controller.login_user("u@example.com", password).await })
            })
            .collect();

        let mut accepted = 0;
        for attempt in attempts {
            match attempt.await.unwrap() {
                Ok(_) => accepted += 1,
                Err(e) => assert_eq!(e.kind, ErrorKind::InvalidCredentials),
            }
        }
        assert_eq!(accepted, 2);
    }

    #[tokio::test]
    async fn test_blocked_account() {
        let fx = fixture();
        let mut user = User::new("b@example.com", fx.hasher.hash("p1").unwrap(), UserRole::User);
        user.status = UserStatus::Blocked;
        fx.store.insert(user);

        let err = fx.controller.login_user("b@example.com", "p1").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::AccountDisabled);

        // Status is not revealed without the password.
        let err = fx.controller.login_user("b@example.com", "nope").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_refresh_without_cookie() {
        let fx = fixture();
        for cookie in [None, Some(""), Some("  ")] {
            let err = fx.controller.refresh_token(cookie).unwrap_err();
            assert_eq!(err.kind, ErrorKind::MissingToken);
        }
    }

    #[tokio::test]
    async fn test_refresh_rotates() {
        let fx = fixture();
        add_user(&fx, "u@example.com", "p1", UserRole::User);
        let login = fx.controller.login_user("u@example.com", "p1").await.unwrap();

        let pair = fx
            .controller
            .refresh_token(Some(&login.tokens.refresh_token))
            .unwrap();
        let payload = fx.tokens.verify_access(&pair.access_token).unwrap();
        assert_eq!(payload.email, "u@example.com");
        assert_eq!(payload.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_refresh_rejects_tampered_and_expired() {
        let fx = fixture();
        add_user(&fx, "u@example.com", "p1", UserRole::User);
        let login = fx.controller.login_user("u@example.com", "p1").await.unwrap();

        let mut tampered = login.tokens.refresh_token.clone();
        tampered.push('x');
        let err = fx.controller.refresh_token(Some(&tampered)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);

        let short = TokenService::with_ttls(
            "access",
            "refresh",
            Duration::minutes(15),
            Duration::seconds(-1),
        );
        let expired = short
            .issue_pair(&User::new("u@example.com", "h", UserRole::User))
            .unwrap()
            .refresh_token;
        let err = fx.controller.refresh_token(Some(&expired)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExpiredToken);
    }

    #[tokio::test]
    async fn test_change_password_wrong_old_leaves_hash() {
        let fx = fixture();
        add_user(&fx, "u@example.com", "p1", UserRole::User);
        let before = fx.store.find_by_email("u@example.com").await.unwrap().unwrap();

        let err = fx
            .controller
            .change_password(&identity("u@example.com", UserRole::User), "bad", "p2")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::PasswordMismatch);

        let after = fx.store.find_by_email("u@example.com").await.unwrap().unwrap();
        assert_eq!(before.password_hash, after.password_hash);
    }

    #[tokio::test]
    async fn test_change_password_scenario() {
        let fx = fixture();
        add_user(&fx, "u@example.com", "p1", UserRole::User);
        let me = identity("u@example.com", UserRole::User);

        fx.controller.change_password(&me, "p1", "p2").await.unwrap();

        let err = fx.controller.login_user("u@example.com", "p1").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCredentials);
        assert!(fx.controller.login_user("u@example.com", "p2").await.is_ok());
    }

    #[tokio::test]
    async fn test_change_password_same_value_succeeds() {
        let fx = fixture();
        add_user(&fx, "u@example.com", "p1", UserRole::User);
        let me = identity("u@example.com", UserRole::User);
        fx.controller.change_password(&me, "p1", "p1").await.unwrap();
        assert!(fx.controller.login_user("u@example.com", "p1").await.is_ok());
    }

    #[tokio::test]
    async fn test_change_password_for_vanished_user() {
        let fx = fixture();
        let err = fx
            .controller
            .change_password(&identity("gone@example.com", UserRole::User), "p1", "p2")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
