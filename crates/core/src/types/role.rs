//! User roles as reported by the authentication service.

use serde::{Deserialize, Serialize};

/// The metadata role value that grants admin access.
pub const ADMIN_ROLE: &str = "admin";

/// A signed-in user's role.
///
/// The auth service stores the role as free text in user metadata. Anything
/// other than exactly `"admin"` (including a missing role) is a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Can add and delete dogs.
    Admin,
    /// Read-only access.
    #[default]
    Member,
}

impl UserRole {
    /// Map a metadata role value to a role.
    #[must_use]
    pub fn from_metadata(role: Option<&str>) -> Self {
        match role {
            Some(ADMIN_ROLE) => Self::Admin,
            _ => Self::Member,
        }
    }

    /// Whether this role may manage dog records.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}
