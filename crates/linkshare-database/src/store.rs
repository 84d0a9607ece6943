//! Store interfaces consumed by the share services.

use async_trait::async_trait;

use linkshare_core::result::AppResult;
use linkshare_core::types::UserId;
use linkshare_entity::share::ShareLink;
use linkshare_entity::user::User;

/// Persistence for share link records, keyed by hash.
///
/// Lookups return a `NotFound` error for unknown hashes. Listing methods
/// also return `NotFound` when nothing matches; callers decide whether
/// that means an empty list.
#[async_trait]
pub trait ShareStore: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch a link by its hash.
    async fn get_by_hash(&self, hash: &str) -> AppResult<ShareLink>;

    /// Insert or replace a link.
    async fn save(&self, link: &ShareLink) -> AppResult<()>;

    /// Remove a link. Removing an unknown hash is not an error.
    async fn delete(&self, hash: &str) -> AppResult<()>;

    /// Links owned by a user.
    async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<ShareLink>>;

    /// Links owned by a user for one resource path.
    async fn find_by_path(&self, path: &str, user_id: UserId) -> AppResult<Vec<ShareLink>>;

    /// Every link.
    async fn all(&self) -> AppResult<Vec<ShareLink>>;

    /// Links with `is_public` set.
    async fn public(&self) -> AppResult<Vec<ShareLink>>;
}

/// Persistence for user records.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch a user by id.
    async fn get(&self, id: UserId) -> AppResult<User>;

    /// Insert or replace a user.
    async fn insert(&self, user: User) -> AppResult<()>;
}
