//! Credential store selection.

use serde::{Deserialize, Serialize};

/// Which backend holds user credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    /// PostgreSQL via the `[database]` section.
    #[default]
    Postgres,
    /// Process-local map, lost on restart.
    Memory,
}

/// Credential store configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Selected backend.
    #[serde(default)]
    pub provider: StoreProvider,
    /// Users inserted at startup when the memory backend is selected.
    #[serde(default)]
    pub seed: Vec<SeedUser>,
}

/// A development user created on startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedUser {
    /// Login email.
    pub email: String,
    /// Plaintext password, hashed before insertion.
    pub password: String,
    /// Role name, e.g. `"USER"`.
    pub role: String,
}
