//! Token claims, signing and the access/refresh token service.

pub mod claims;
pub mod service;
pub mod signer;

pub use claims::{Claims, TokenPayload};
pub use service::{TokenPair, TokenService};
pub use signer::{SignedToken, Signer};
