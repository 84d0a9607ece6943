//! Seed users for the in-memory user store.

use serde::{Deserialize, Serialize};

/// A user record loaded from configuration at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedUser {
    /// Fixed user ID (UUID string).
    pub id: String,
    /// Login name.
    pub username: String,
    /// Name shown in public share listings.
    #[serde(default)]
    pub display_name: Option<String>,
    /// `"admin"` or `"user"`.
    #[serde(default = "default_role")]
    pub role: String,
    /// The user's filesystem scope, relative to the storage root.
    pub scope: String,
    /// Whether the user may create and manage share links.
    #[serde(default = "default_true")]
    pub can_share: bool,
}

fn default_role() -> String {
    "user".to_string()
}

fn default_true() -> bool {
    true
}
