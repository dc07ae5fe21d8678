//! # shopfront-auth
//!
//! Authentication and authorization core for Shopfront.
//!
//! ## Modules
//!
//! - `jwt`: stateless token signing, access/refresh pairs and rotation
//! - `password`: Argon2id password hashing
//! - `rbac`: role-set guards producing an [`AuthenticatedIdentity`]
//! - `store`: the credential lookup/update seam and an in-memory backend
//! - `controller`: login, refresh and change-password orchestration
//!
//! Roles are embedded in tokens when they are issued and are not re-read from
//! the store per request. A role change only takes effect for a holder after
//! their next login or refresh, and a password change leaves tokens already
//! handed out valid until they expire.

pub mod controller;
pub mod identity;
pub mod jwt;
pub mod password;
pub mod rbac;
pub mod store;

pub use controller::{AuthController, LoginOutcome, PublicUser};
pub use identity::AuthenticatedIdentity;
pub use jwt::{Signer, TokenPair, TokenPayload, TokenService};
pub use password::PasswordHasher;
pub use rbac::{RoleSet, authorize};
pub use store::{CredentialStore, MemoryCredentialStore};
