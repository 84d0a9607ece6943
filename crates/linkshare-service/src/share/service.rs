//! Share link lifecycle: create, list, publish, unpublish and delete.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use linkshare_core::error::{AppError, ErrorKind};
use linkshare_core::result::AppResult;
use linkshare_core::traits::SecretHasher;
use linkshare_database::{ShareStore, UserStore};
use linkshare_entity::share::{
    CreateShareBody, ExpiryUnit, PublicShareBody, ShareLink, SharePermission,
};
use linkshare_storage::{StorageManager, path};

use super::link::LinkService;
use super::policy::AccessPolicy;
use crate::context::RequestContext;

/// Number of fresh hashes tried before giving up on a collision.
const HASH_ATTEMPTS: usize = 5;

/// A public link with its owner's name, as shown in the public listing.
#[derive(Debug, Clone, Serialize)]
pub struct PublicShareEntry {
    /// The link, with its access token removed.
    #[serde(flatten)]
    pub link: ShareLink,
    /// Owner's display name; empty if the owner could not be loaded.
    pub username: String,
}

/// Manages share link records.
#[derive(Debug, Clone)]
pub struct ShareService {
    /// Share link store.
    shares: Arc<dyn ShareStore>,
    /// User store, for owner lookups.
    users: Arc<dyn UserStore>,
    /// Storage manager, to check shared paths exist.
    storage: Arc<StorageManager>,
    /// Hasher for link passwords.
    hasher: Arc<dyn SecretHasher>,
    /// Hash and token generation.
    links: LinkService,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        shares: Arc<dyn ShareStore>,
        users: Arc<dyn UserStore>,
        storage: Arc<StorageManager>,
        hasher: Arc<dyn SecretHasher>,
        links: LinkService,
    ) -> Self {
        Self {
            shares,
            users,
            storage,
            hasher,
            links,
        }
    }

    /// Creates a link to `resource_path` in the caller's filesystem.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        resource_path: &str,
        body: CreateShareBody,
    ) -> AppResult<ShareLink> {
        AccessPolicy::require_share_capability(ctx)?;

        let resource_path = path::clean(resource_path);
        let owner = self.users.get(ctx.user_id).await?;
        self.storage.user_fs(&owner).await.stat(&resource_path).await?;

        let expire = expiry_timestamp(&body.expires, &body.unit)?;
        let hash = self.unused_hash().await?;

        let (password_hash, token) = if body.password.is_empty() {
            (String::new(), String::new())
        } else {
            (
                self.hasher.hash(&body.password)?,
                self.links.generate_token()?,
            )
        };

        let link = ShareLink {
            hash,
            path: resource_path,
            user_id: ctx.user_id,
            expire,
            password_hash,
            token,
            is_public: false,
            permission: None,
            allowed_users: Vec::new(),
        };
        self.shares.save(&link).await?;

        info!(
            user_id = %ctx.user_id,
            path = %link.path,
            expire = link.expire,
            protected = link.has_password(),
            "Share created"
        );
        Ok(link)
    }

    /// Lists all links for admins, the caller's own links otherwise.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<ShareLink>> {
        AccessPolicy::require_share_capability(ctx)?;

        let result = if ctx.is_admin() {
            self.shares.all().await
        } else {
            self.shares.find_by_user(ctx.user_id).await
        };
        let mut links = or_empty(result)?;
        sort_links(&mut links);
        Ok(links)
    }

    /// Lists the caller's links for one resource path.
    pub async fn list_for_path(
        &self,
        ctx: &RequestContext,
        resource_path: &str,
    ) -> AppResult<Vec<ShareLink>> {
        AccessPolicy::require_share_capability(ctx)?;

        let mut links = or_empty(
            self.shares
                .find_by_path(&path::clean(resource_path), ctx.user_id)
                .await,
        )?;
        sort_links(&mut links);
        Ok(links)
    }

    /// Lists public links with their owners' names. Access tokens are removed.
    pub async fn list_public(&self, ctx: &RequestContext) -> AppResult<Vec<PublicShareEntry>> {
        AccessPolicy::require_share_capability(ctx)?;

        let mut links = or_empty(self.shares.public().await)?;
        sort_links(&mut links);

        let mut entries = Vec::with_capacity(links.len());
        for mut link in links {
            let username = match self.users.get(link.user_id).await {
                Ok(owner) => owner.presentation_name().to_string(),
                Err(_) => String::new(),
            };
            link.token.clear();
            entries.push(PublicShareEntry { link, username });
        }
        Ok(entries)
    }

    /// Deletes a link. Only the owner or an admin may delete it.
    pub async fn delete(&self, ctx: &RequestContext, hash: &str) -> AppResult<()> {
        AccessPolicy::require_share_capability(ctx)?;

        let link = self.managed_link(ctx, hash).await?;
        self.shares.delete(&link.hash).await?;

        info!(user_id = %ctx.user_id, path = %link.path, "Share deleted");
        Ok(())
    }

    /// Makes a link public with the given permission and allow-list.
    pub async fn publish(
        &self,
        ctx: &RequestContext,
        hash: &str,
        body: PublicShareBody,
    ) -> AppResult<ShareLink> {
        AccessPolicy::require_share_capability(ctx)?;

        let mut link = self.managed_link(ctx, hash).await?;
        let permission: SharePermission = body.permission.parse()?;
        link.publish(permission, body.allowed_users);
        self.shares.save(&link).await?;

        info!(
            user_id = %ctx.user_id,
            path = %link.path,
            permission = %permission,
            allowed_users = link.allowed_users.len(),
            "Share published"
        );
        Ok(link)
    }

    /// Makes a link private again.
    pub async fn unpublish(&self, ctx: &RequestContext, hash: &str) -> AppResult<ShareLink> {
        AccessPolicy::require_share_capability(ctx)?;

        let mut link = self.managed_link(ctx, hash).await?;
        link.unpublish();
        self.shares.save(&link).await?;

        info!(user_id = %ctx.user_id, path = %link.path, "Share unpublished");
        Ok(link)
    }

    /// Load a link the caller may manage.
    async fn managed_link(&self, ctx: &RequestContext, hash: &str) -> AppResult<ShareLink> {
        let hash = hash.trim_matches('/');
        if hash.is_empty() {
            return Err(AppError::validation("Missing share hash"));
        }

        let link = self.shares.get_by_hash(hash).await?;
        AccessPolicy::authorize_management(&link, ctx)?;
        Ok(link)
    }

    async fn unused_hash(&self) -> AppResult<String> {
        for _ in 0..HASH_ATTEMPTS {
            let hash = self.links.generate_hash()?;
            match self.shares.get_by_hash(&hash).await {
                Err(e) if e.is(ErrorKind::NotFound) => return Ok(hash),
                Err(e) => return Err(e),
                Ok(_) => continue,
            }
        }
        Err(AppError::internal("Could not generate an unused share hash"))
    }
}

/// Absolute expiry from an amount and unit; empty or zero means never.
fn expiry_timestamp(amount: &str, unit: &str) -> AppResult<i64> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Ok(0);
    }

    let amount: i64 = amount
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid expiry amount: '{amount}'")))?;
    if amount < 0 {
        return Err(AppError::validation("Expiry amount cannot be negative"));
    }
    if amount == 0 {
        return Ok(0);
    }

    ExpiryUnit::parse(unit)
        .duration(amount)
        .and_then(|d| Utc::now().checked_add_signed(d))
        .map(|at| at.timestamp())
        .ok_or_else(|| AppError::validation("Expiry is out of range"))
}

fn or_empty(result: AppResult<Vec<ShareLink>>) -> AppResult<Vec<ShareLink>> {
    match result {
        Err(e) if e.is(ErrorKind::NotFound) => Ok(Vec::new()),
        other => other,
    }
}

fn sort_links(links: &mut [ShareLink]) {
    links.sort_by(|a, b| a.user_id.cmp(&b.user_id).then(a.expire.cmp(&b.expire)));
}
