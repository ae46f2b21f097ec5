//! Caller identity extractors.
//!
//! Authentication itself is an external collaborator concern: the
//! fronting auth layer validates credentials and tags each request with
//! the caller's role in the `x-user-role` header. The extractors here
//! only read that tag.
//!
//! # Usage
//!
//! ```rust,ignore
//! async fn list_registrations(
//!     admin: RequireAdmin,
//! ) -> Result<Json<Value>, AppError> {
//!     // admin.role is guaranteed to be Admin or Superadmin
//! }
//! ```

use crate::error::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// Header carrying the pre-authenticated caller's role.
pub const ROLE_HEADER: &str = "x-user-role";

/// Role tag supplied by the fronting auth layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Regular fest participant.
    Participant,
    /// Fest admin.
    Admin,
    /// Fest superadmin.
    Superadmin,
}

impl Role {
    /// Parses the header value; unknown values fall back to participant.
    #[must_use]
    pub fn from_header(value: &str) -> Self {
        match value {
            "admin" => Self::Admin,
            "superadmin" => Self::Superadmin,
            _ => Self::Participant,
        }
    }

    /// Whether this role carries the admin capability.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin | Self::Superadmin)
    }
}

/// Any authenticated caller.
///
/// Rejects with 401 if the role tag is missing entirely.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedCaller {
    /// The caller's role.
    pub role: Role,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedCaller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let role = parts
            .headers
            .get(ROLE_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authenticated caller role"))?;

        Ok(Self {
            role: Role::from_header(role),
        })
    }
}

/// Caller with the admin capability (admin or superadmin).
///
/// Rejects with 401 if unauthenticated, 403 otherwise.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin {
    /// The caller's role (admin or superadmin).
    pub role: Role,
}

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let caller = AuthenticatedCaller::from_request_parts(parts, state).await?;
        if !caller.role.is_admin() {
            return Err(AppError::forbidden("Admin role required"));
        }
        Ok(Self { role: caller.role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_roles_are_participants() {
        assert_eq!(Role::from_header("admin"), Role::Admin);
        assert_eq!(Role::from_header("superadmin"), Role::Superadmin);
        assert_eq!(Role::from_header("Admin"), Role::Participant);
        assert_eq!(Role::from_header(""), Role::Participant);
    }

    #[test]
    fn admin_capability_covers_both_admin_roles() {
        assert!(Role::Admin.is_admin());
        assert!(Role::Superadmin.is_admin());
        assert!(!Role::Participant.is_admin());
    }
}
