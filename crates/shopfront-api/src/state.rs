//! Shared state handed to every handler and middleware.

use std::sync::Arc;
use std::time::Instant;

use shopfront_auth::{AuthController, CredentialStore, PasswordHasher, TokenService};
use shopfront_core::config::AppConfig;
use shopfront_core::result::AppResult;

/// Application state. Every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// Token issuance and verification.
    pub tokens: Arc<TokenService>,
    /// Login, refresh and change-password flows.
    pub auth: Arc<AuthController>,
    /// Credential backend, kept for health checks.
    pub store: Arc<dyn CredentialStore>,
    /// Process start, for uptime reporting.
    pub started_at: Instant,
}

impl AppState {
    /// Wires the auth core over `store`.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn CredentialStore>,
        hasher: Arc<PasswordHasher>,
    ) -> AppResult<Self> {
        let tokens = Arc::new(TokenService::new(&config.auth)?);
        let auth = Arc::new(AuthController::new(
            Arc::clone(&tokens),
            Arc::clone(&store),
            hasher,
        ));

        Ok(Self {
            config: Arc::new(config),
            tokens,
            auth,
            store,
            started_at: Instant::now(),
        })
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}
