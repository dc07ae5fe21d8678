//! Route guards: bearer token in, authenticated identity out.

use std::fmt;

use shopfront_core::error::AppError;
use shopfront_core::result::AppResult;
use shopfront_entity::user::UserRole;

use crate::identity::AuthenticatedIdentity;
use crate::jwt::TokenService;

/// The roles permitted on a route. Empty means any authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoleSet {
    super_admin: bool,
    admin: bool,
    user: bool,
}

impl RoleSet {
    /// Admits any authenticated identity.
    pub fn any() -> Self {
        Self::default()
    }

    /// Admits exactly the listed roles.
    pub fn of(roles: &[UserRole]) -> Self {
        roles.iter().fold(Self::default(), |set, role| set.with(*role))
    }

    /// Returns a copy with `role` added.
    pub fn with(mut self, role: UserRole) -> Self {
        match role {
            UserRole::SuperAdmin => self.super_admin = true,
            UserRole::Admin => self.admin = true,
            UserRole::User => self.user = true,
        }
        self
    }

    /// Whether no role was declared.
    pub fn is_empty(&self) -> bool {
        !(self.super_admin || self.admin || self.user)
    }

    /// Whether `role` may pass.
    pub fn permits(&self, role: UserRole) -> bool {
        if self.is_empty() {
            return true;
        }
        match role {
            UserRole::SuperAdmin => self.super_admin,
            UserRole::Admin => self.admin,
            UserRole::User => self.user,
        }
    }

    /// Declared roles in declaration order.
    pub fn roles(&self) -> Vec<UserRole> {
        UserRole::ALL
            .into_iter()
            .filter(|role| !self.is_empty() && self.permits(*role))
            .collect()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("any");
        }
        let names: Vec<&str> = self.roles().iter().map(UserRole::as_str).collect();
        f.write_str(&names.join(", "))
    }
}

/// Fails with `InsufficientRole` unless `permitted` admits the identity.
pub fn ensure_role(identity: &AuthenticatedIdentity, permitted: &RoleSet) -> AppResult<()> {
    if permitted.permits(identity.role) {
        Ok(())
    } else {
        Err(AppError::insufficient_role(format!(
            "Insufficient role. Required one of: {permitted}"
        )))
    }
}

/// Verifies a raw access token and checks the caller's role.
///
/// `raw_token` is whatever the transport extracted; `None` or an empty string
/// means no credential was presented.
pub fn authorize(
    tokens: &TokenService,
    raw_token: Option<&str>,
    permitted: &RoleSet,
) -> AppResult<AuthenticatedIdentity> {
    let token = raw_token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::missing_token("You are not authorized"))?;

    let identity = AuthenticatedIdentity::from(tokens.verify_access(token)?);
    ensure_role(&identity, permitted)?;
    Ok(identity)
}
