//! Narrow credential lookup/update interface consumed by the auth core.
//!
//! The persistent implementation lives in `shopfront-database`; an in-memory
//! backend ships here for tests and local runs.

pub mod memory;

use async_trait::async_trait;

use shopfront_core::result::AppResult;
use shopfront_entity::user::User;

pub use memory::MemoryCredentialStore;

/// Where user credentials live.
///
/// Writes are last-write-wins; no ordering is enforced between concurrent
/// password changes for the same user.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Looks a user up by email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Replaces the stored hash. Returns `false` when no such user exists.
    async fn update_password_hash(&self, email: &str, password_hash: &str) -> AppResult<bool>;

    /// Checks that the backend is reachable.
    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}
