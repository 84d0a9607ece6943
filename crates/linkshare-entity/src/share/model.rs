//! Share link entity model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use linkshare_core::AppError;
use linkshare_core::types::UserId;

/// What authenticated users may do through a public link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharePermission {
    /// Browse and download only.
    View,
    /// Create, modify, move, copy and delete inside the shared folder.
    Change,
}

impl SharePermission {
    /// Return the permission as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Change => "change",
        }
    }
}

impl fmt::Display for SharePermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SharePermission {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Self::View),
            "change" => Ok(Self::Change),
            _ => Err(AppError::validation(format!(
                "Invalid permission: '{s}'. Expected 'view' or 'change'"
            ))),
        }
    }
}

/// A share link: an unguessable capability exposing one path of the
/// owner's filesystem.
///
/// `token` is present exactly when `password_hash` is; `permission` and
/// `allowed_users` only carry meaning while `is_public` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLink {
    /// The external capability identifier.
    pub hash: String,
    /// Absolute path of the shared file or directory in the owner's filesystem.
    pub path: String,
    /// The user whose filesystem is exposed.
    #[serde(rename = "userID")]
    pub user_id: UserId,
    /// Expiry as Unix seconds; 0 means the link never expires.
    #[serde(default)]
    pub expire: i64,
    /// One-way hash of the link password; empty when unprotected.
    #[serde(default, skip_serializing)]
    pub password_hash: String,
    /// Pre-authorized bypass secret minted alongside a password.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,
    /// Whether authenticated users get access beyond the capability holder.
    #[serde(rename = "isPublic", default)]
    pub is_public: bool,
    /// Permission granted to authenticated users while public.
    #[serde(default)]
    pub permission: Option<SharePermission>,
    /// Users allowed to use the `change` permission; empty means anyone.
    #[serde(rename = "allowed_users", default)]
    pub allowed_users: Vec<UserId>,
}

impl ShareLink {
    /// Whether the link requires a password.
    pub fn has_password(&self) -> bool {
        !self.password_hash.is_empty()
    }

    /// The absolute expiry instant, or `None` for links that never expire.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        if self.expire == 0 {
            return None;
        }
        DateTime::from_timestamp(self.expire, 0)
    }

    /// Check whether the link is expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expire != 0 && self.expire <= now.timestamp()
    }

    /// Whether the link currently grants the `change` permission.
    pub fn allows_change(&self) -> bool {
        self.is_public && self.permission == Some(SharePermission::Change)
    }

    /// Make the link public with the given permission and allow-list.
    pub fn publish(&mut self, permission: SharePermission, allowed_users: Vec<UserId>) {
        self.is_public = true;
        self.permission = Some(permission);
        self.allowed_users = allowed_users;
    }

    /// Make the link private again, dropping permission and allow-list.
    pub fn unpublish(&mut self) {
        self.is_public = false;
        self.permission = None;
        self.allowed_users.clear();
    }
}
