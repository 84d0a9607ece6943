//! Share repository implementation.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use linkshare_core::error::AppError;
use linkshare_core::result::AppResult;
use linkshare_core::types::UserId;
use linkshare_entity::share::ShareLink;

use crate::store::ShareStore;

/// Repository for share link records, keyed by hash.
#[derive(Debug, Default)]
pub struct ShareRepository {
    links: DashMap<String, ShareLink>,
}

impl ShareRepository {
    /// Create an empty share repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn collect<F>(&self, what: &str, filter: F) -> AppResult<Vec<ShareLink>>
    where
        F: Fn(&ShareLink) -> bool,
    {
        let links: Vec<ShareLink> = self
            .links
            .iter()
            .filter(|entry| filter(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();

        if links.is_empty() {
            return Err(AppError::not_found(format!("No {what} found")));
        }
        Ok(links)
    }
}

#[async_trait]
impl ShareStore for ShareRepository {
    async fn get_by_hash(&self, hash: &str) -> AppResult<ShareLink> {
        self.links
            .get(hash)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found("Share link not found"))
    }

    async fn save(&self, link: &ShareLink) -> AppResult<()> {
        self.links.insert(link.hash.clone(), link.clone());
        debug!(user_id = %link.user_id, path = %link.path, "Saved share link");
        Ok(())
    }

    async fn delete(&self, hash: &str) -> AppResult<()> {
        if self.links.remove(hash).is_some() {
            debug!("Deleted share link");
        }
        Ok(())
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<ShareLink>> {
        self.collect("shares for user", |l| l.user_id == user_id)
    }

    async fn find_by_path(&self, path: &str, user_id: UserId) -> AppResult<Vec<ShareLink>> {
        self.collect("shares for path", |l| l.user_id == user_id && l.path == path)
    }

    async fn all(&self) -> AppResult<Vec<ShareLink>> {
        self.collect("shares", |_| true)
    }

    async fn public(&self) -> AppResult<Vec<ShareLink>> {
        self.collect("public shares", |l| l.is_public)
    }
}
