//! Storage manager: hands out per-user filesystem views over the root driver.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use linkshare_core::result::AppResult;
use linkshare_core::traits::storage::FileSystem;
use linkshare_entity::user::User;

use crate::base_path::BasePathFs;
use crate::path;

/// Central storage manager holding the root filesystem driver.
#[derive(Debug, Clone)]
pub struct StorageManager {
    /// The driver every user scope lives in.
    root: Arc<dyn FileSystem>,
    /// Cleaned scope path → view over `root`.
    views: Arc<RwLock<HashMap<String, Arc<dyn FileSystem>>>>,
}

impl StorageManager {
    /// Create a manager over the given root driver.
    pub fn new(root: Arc<dyn FileSystem>) -> Self {
        Self {
            root,
            views: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The unconfined root driver.
    pub fn root(&self) -> Arc<dyn FileSystem> {
        Arc::clone(&self.root)
    }

    /// The filesystem a user sees: the root confined to the user's scope.
    pub async fn user_fs(&self, user: &User) -> Arc<dyn FileSystem> {
        let scope = path::clean(&user.scope);
        if scope == "/" {
            return self.root();
        }

        if let Some(view) = self.views.read().await.get(&scope) {
            return Arc::clone(view);
        }

        let mut views = self.views.write().await;
        let view = views
            .entry(scope.clone())
            .or_insert_with(|| Arc::new(BasePathFs::new(Arc::clone(&self.root), &scope)));
        debug!(user_id = %user.id, scope = %scope, "Created user filesystem view");
        Arc::clone(view)
    }

    /// Create a user's scope directory if it is missing.
    pub async fn ensure_scope(&self, user: &User, dir_mode: u32) -> AppResult<()> {
        let scope = path::clean(&user.scope);
        if !self.root.exists(&scope).await? {
            self.root.mkdir_all(&scope, dir_mode).await?;
            debug!(user_id = %user.id, scope = %scope, "Created user scope directory");
        }
        Ok(())
    }

    /// Check the root driver is reachable.
    pub async fn health_check(&self) -> bool {
        self.root.exists("/").await.unwrap_or(false)
    }
}
