//! In-memory credential store backed by a concurrent map.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::info;

use shopfront_core::config::SeedUser;
use shopfront_core::result::AppResult;
use shopfront_entity::user::{User, UserRole};

use super::CredentialStore;
use crate::password::PasswordHasher;

/// Process-local credential store. Emails match case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    users: Arc<DashMap<String, User>>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a user.
    pub fn insert(&self, user: User) {
        self.users.insert(key(&user.email), user);
    }

    /// Hashes and inserts development users. Returns how many were added.
    pub fn seed(&self, hasher: &PasswordHasher, seeds: &[SeedUser]) -> AppResult<usize> {
        for seed in seeds {
            let role: UserRole = seed.role.parse()?;
            let hash = hasher.hash(&seed.password)?;
            self.insert(User::new(seed.email.clone(), hash, role));
            info!(email = %seed.email, role = %role, "Seeded user");
        }
        Ok(seeds.len())
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.get(&key(email)).map(|entry| entry.value().clone()))
    }

    async fn update_password_hash(&self, email: &str, password_hash: &str) -> AppResult<bool> {
        match self.users.get_mut(&key(email)) {
            Some(mut entry) => {
                entry.password_hash = password_hash.to_string();
                entry.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn key(email: &str) -> String {
    email.trim().to_lowercase()
}
