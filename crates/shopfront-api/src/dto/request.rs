//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account email.
    #[validate(
        length(min = 1, message = "Email is required"),
        contains(pattern = "@", message = "Email is invalid")
    )]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Password change request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,
    /// Replacement password.
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let ok = LoginRequest {
            email: "a@example.com".into(),
            password: "p1".into(),
        };
        assert!(ok.validate().is_ok());

        let no_at = LoginRequest {
            email: "example.com".into(),
            password: "p1".into(),
        };
        assert!(no_at.validate().is_err());

        let empty_password = LoginRequest {
            email: "a@example.com".into(),
            password: String::new(),
        };
        assert!(empty_password.validate().is_err());
    }

    #[test]
    fn test_change_password_uses_camel_case() {
        let req: ChangePasswordRequest =
            serde_json::from_str(r#"{"oldPassword":"p1","newPassword":"p2"}"#).unwrap();
        assert_eq!(req.old_password, "p1");
        assert_eq!(req.new_password, "p2");
    }
}
