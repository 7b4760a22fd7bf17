//! Well-known role names and the permission hierarchy between them.
//!
//! These must match the seed data in `20260301000001_create_roles_and_users.sql`.

use std::fmt;
use std::str::FromStr;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
pub const ROLE_GUEST: &str = "guest";

/// Permission tier held by a user.
///
/// Tiers are ordered: an admin passes every user-level and guest-level
/// check, a user passes every guest-level check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Guest,
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Guest => ROLE_GUEST,
            Self::User => ROLE_USER,
            Self::Admin => ROLE_ADMIN,
        }
    }

    /// Whether a holder of `self` may access something gated on `required`.
    pub fn allows(self, required: Role) -> bool {
        self >= required
    }

    /// Resolve a role name, treating superusers as admins regardless of
    /// the stored role.
    pub fn effective(name: &str, is_superuser: bool) -> Option<Role> {
        if is_superuser {
            return Some(Role::Admin);
        }
        name.parse().ok()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_GUEST => Ok(Self::Guest),
            ROLE_USER => Ok(Self::User),
            ROLE_ADMIN => Ok(Self::Admin),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_passes_every_gate() {
        assert!(Role::Admin.allows(Role::Guest));
        assert!(Role::Admin.allows(Role::User));
        assert!(Role::Admin.allows(Role::Admin));
    }

    #[test]
    fn guest_only_passes_guest_gate() {
        assert!(Role::Guest.allows(Role::Guest));
        assert!(!Role::Guest.allows(Role::User));
        assert!(!Role::Guest.allows(Role::Admin));
    }

    #[test]
    fn user_does_not_pass_admin_gate() {
        assert!(Role::User.allows(Role::Guest));
        assert!(!Role::User.allows(Role::Admin));
    }

    #[test]
    fn superuser_is_always_admin() {
        assert_eq!(Role::effective("guest", true), Some(Role::Admin));
        assert_eq!(Role::effective("user", false), Some(Role::User));
        assert_eq!(Role::effective("baker", false), None);
    }

    #[test]
    fn round_trips_names() {
        for role in [Role::Guest, Role::User, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }
}
