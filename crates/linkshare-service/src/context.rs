//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use linkshare_core::types::UserId;
use linkshare_entity::user::{User, UserRole};

/// Context for the current authenticated request.
///
/// Built by the API layer from a verified bearer token and the current
/// user record, then passed into service methods so that every operation
/// knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The user's current role.
    pub role: UserRole,
    /// The username.
    pub username: String,
    /// Whether the user may create and manage share links.
    pub can_share: bool,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for the given user.
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
            username: user.username.clone(),
            can_share: user.can_share,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
