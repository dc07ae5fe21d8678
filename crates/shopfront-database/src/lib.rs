//! # shopfront-database
//!
//! PostgreSQL connection management and the repository backing
//! [`shopfront_auth::CredentialStore`].

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::UserRepository;
