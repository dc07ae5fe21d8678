//! Role-based access control for routes.

pub mod guard;

pub use guard::{RoleSet, authorize, ensure_role};
