//! The authenticated identity and the member-lookup seam.

use std::future::Future;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Authorization tier of a member. Two fixed tiers only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Parses the stored role string; `None` for anything unrecognized.
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Whether this role meets a path's requirement. Administrators
    /// satisfy every tier; an ordinary member only their own.
    pub fn satisfies(&self, required: Role) -> bool {
        *self == Role::Admin || *self == required
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated identity for one request.
///
/// Built from a store-backed lookup at authentication time; never
/// persisted, never carried across requests. The role comes from the
/// lookup, not from the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub member_id: i64,
    pub email: String,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Member lookup behind authentication.
///
/// The production implementation queries the members table; tests
/// substitute a fixture resolver. This is also the seam where an external
/// identity provider would hand over a verified identity.
pub trait PrincipalResolver: Send + Sync {
    /// Resolves the member a token subject refers to.
    ///
    /// Fails with [`AuthError::UnknownPrincipal`](crate::AuthError::UnknownPrincipal)
    /// when no member has this email.
    fn resolve_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Principal, crate::AuthError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_known_values() {
        assert_eq!(Role::parse("user"), Some(Role::User));
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_role_display_matches_storage_form() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::parse(Role::Admin.as_str()), Some(Role::Admin));
    }

    #[test]
    fn test_satisfies() {
        assert!(Role::Admin.satisfies(Role::Admin));
        assert!(Role::Admin.satisfies(Role::User));
        assert!(Role::User.satisfies(Role::User));
        assert!(!Role::User.satisfies(Role::Admin));
    }

    #[test]
    fn test_is_admin() {
        let member = Principal {
            member_id: 1,
            email: "a@x.com".to_string(),
            role: Role::User,
        };
        assert!(!member.is_admin());

        let admin = Principal { role: Role::Admin, ..member };
        assert!(admin.is_admin());
    }
}
