//! User roles and the role-based authorization check.
//!
//! Role names are stored upper-case in `users.role` and must match the CHECK
//! constraint in `20250101000001_create_users_table.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Coarse permission tier of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Authenticated but without access to the admin panel.
    User,
    Admin,
    Superadmin,
}

/// Roles allowed to use the admin panel (contact triage, content management).
pub const STAFF_ROLES: &[Role] = &[Role::Admin, Role::Superadmin];

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
            Role::Superadmin => "SUPERADMIN",
        }
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            "SUPERADMIN" => Ok(Role::Superadmin),
            other => Err(CoreError::Validation(format!("Unknown role '{other}'"))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check `role` against a route's allow-list.
///
/// Returns [`CoreError::Forbidden`] when the role is not listed.
pub fn authorize(role: Role, allowed: &[Role]) -> Result<(), CoreError> {
    if allowed.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Role {role} is not authorized to access this route"
        )))
    }
}
