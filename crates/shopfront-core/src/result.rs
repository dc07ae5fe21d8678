//! Convenience result type alias for Shopfront.

use crate::error::AppError;

/// A specialized `Result` type for Shopfront operations.
pub type AppResult<T> = Result<T, AppError>;
