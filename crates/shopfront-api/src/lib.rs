//! # shopfront-api
//!
//! HTTP layer for Shopfront built on Axum.
//!
//! Mounts the auth routes under `/api/v1`, guards them by role, and maps
//! [`shopfront_core::AppError`] into the JSON error envelope via
//! [`error::ApiError`].

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
