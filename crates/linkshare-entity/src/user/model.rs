//! User entity model.

use serde::{Deserialize, Serialize};

use linkshare_core::AppError;
use linkshare_core::config::SeedUser;
use linkshare_core::types::UserId;

use super::role::UserRole;

/// A registered user: a link owner or an authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Human-readable display name.
    pub display_name: Option<String>,
    /// User role.
    pub role: UserRole,
    /// Sub-tree of the storage root that forms this user's filesystem.
    pub scope: String,
    /// Whether the user may create and manage share links.
    pub can_share: bool,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// The name shown next to the user's public links.
    pub fn presentation_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

impl TryFrom<&SeedUser> for User {
    type Error = AppError;

    fn try_from(seed: &SeedUser) -> Result<Self, Self::Error> {
        let id = seed.id.parse::<UserId>().map_err(|e| {
            AppError::configuration(format!("Invalid id for user '{}': {e}", seed.username))
        })?;
        Ok(Self {
            id,
            username: seed.username.clone(),
            display_name: seed.display_name.clone(),
            role: seed.role.parse()?,
            scope: seed.scope.clone(),
            can_share: seed.can_share,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(id: &str) -> SeedUser {
        SeedUser {
            id: id.into(),
            username: "alice".into(),
            display_name: None,
            role: "admin".into(),
            scope: "/users/alice".into(),
            can_share: true,
        }
    }

    #[test]
    fn test_seed_conversion() {
        let user = User::try_from(&seed("7b1c6f1e-2f43-4a39-9d53-0d4c0f1f6a10")).unwrap();
        assert!(user.is_admin());
        assert_eq!(user.presentation_name(), "alice");
        assert!(User::try_from(&seed("not-a-uuid")).is_err());
    }
}
