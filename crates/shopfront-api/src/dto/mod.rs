//! Request and response bodies.

pub mod request;
pub mod response;

pub use request::{ChangePasswordRequest, LoginRequest};
pub use response::{ApiResponse, HealthResponse, LoginResponse, NotFoundDetail, NotFoundResponse, RefreshResponse};
