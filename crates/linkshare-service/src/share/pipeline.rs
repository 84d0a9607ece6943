//! The public share request pipeline: `resolve → authenticate → authorize → bind`.
//!
//! Each stage consumes the previous stage's value and returns the next one,
//! so a handler cannot reach the filesystem without passing every check.

use std::sync::Arc;

use linkshare_core::error::AppError;
use linkshare_core::result::AppResult;
use linkshare_core::traits::SecretHasher;
use linkshare_database::{ShareStore, UserStore};
use linkshare_entity::share::ShareLink;
use linkshare_entity::user::User;
use linkshare_storage::StorageManager;

use super::gate::{PasswordGate, ShareCredentials};
use super::policy::AccessPolicy;
use super::resolver::{LinkResolver, ResolvedLink};
use super::scope::{ScopeBinder, ShareScope};
use crate::context::RequestContext;

/// A link whose password gate has been passed.
#[derive(Debug, Clone)]
pub struct AuthenticatedLink {
    link: ShareLink,
    sub_path: String,
}

/// An authenticated link the caller may write through.
#[derive(Debug, Clone)]
pub struct AuthorizedLink {
    link: ShareLink,
    sub_path: String,
    caller: RequestContext,
}

/// Read access to a share: the link bound to its confined view.
#[derive(Debug, Clone)]
pub struct SharedView {
    /// The resolved link.
    pub link: ShareLink,
    /// Path inside the share the request addressed.
    pub sub_path: String,
    /// The confined view.
    pub scope: ShareScope,
    /// The user whose filesystem is exposed.
    pub owner: User,
}

/// Write access to a share, consumed by the file operation executor.
#[derive(Debug, Clone)]
pub struct SharedResourceContext {
    /// The resolved link.
    pub link: ShareLink,
    /// Path inside the share the request addressed.
    pub sub_path: String,
    /// The confined view.
    pub scope: ShareScope,
    /// The user whose filesystem is exposed.
    pub owner: User,
    /// The authenticated caller performing the write.
    pub caller: RequestContext,
}

/// Runs the stages of a public share request.
#[derive(Debug, Clone)]
pub struct SharePipeline {
    resolver: LinkResolver,
    gate: PasswordGate,
    binder: ScopeBinder,
    users: Arc<dyn UserStore>,
    storage: Arc<StorageManager>,
}

impl SharePipeline {
    /// Creates a new pipeline.
    pub fn new(
        shares: Arc<dyn ShareStore>,
        users: Arc<dyn UserStore>,
        storage: Arc<StorageManager>,
        hasher: Arc<dyn SecretHasher>,
        type_detection_by_header: bool,
    ) -> Self {
        Self {
            resolver: LinkResolver::new(shares),
            gate: PasswordGate::new(hasher),
            binder: ScopeBinder::new(type_detection_by_header),
            users,
            storage,
        }
    }

    /// The binder used to describe bound scopes.
    pub fn binder(&self) -> &ScopeBinder {
        &self.binder
    }

    /// Stage 1: find the link addressed by `raw`.
    pub async fn resolve(&self, raw: &str) -> AppResult<ResolvedLink> {
        self.resolver.resolve(raw).await
    }

    /// Stage 2: pass the link's password gate.
    pub fn authenticate(
        &self,
        resolved: ResolvedLink,
        credentials: &ShareCredentials,
    ) -> AppResult<AuthenticatedLink> {
        self.gate.check(&resolved.link, credentials)?;
        Ok(AuthenticatedLink {
            link: resolved.link,
            sub_path: resolved.sub_path,
        })
    }

    /// Stage 3: check the caller may write through the link.
    pub fn authorize(
        &self,
        authenticated: AuthenticatedLink,
        caller: RequestContext,
    ) -> AppResult<AuthorizedLink> {
        AccessPolicy::authorize_write(&authenticated.link, &caller)?;
        Ok(AuthorizedLink {
            link: authenticated.link,
            sub_path: authenticated.sub_path,
            caller,
        })
    }

    /// Stage 4 for reads: bind the link to its confined view.
    pub async fn bind_view(&self, authenticated: AuthenticatedLink) -> AppResult<SharedView> {
        let (owner, scope) = self.bind_scope(&authenticated.link).await?;
        Ok(SharedView {
            link: authenticated.link,
            sub_path: authenticated.sub_path,
            scope,
            owner,
        })
    }

    /// Stage 4 for writes: bind the link; single-file shares are not writable.
    pub async fn bind(&self, authorized: AuthorizedLink) -> AppResult<SharedResourceContext> {
        let (owner, scope) = self.bind_scope(&authorized.link).await?;
        if !scope.is_dir() {
            return Err(AppError::forbidden("Single-file shares cannot be edited"));
        }
        Ok(SharedResourceContext {
            link: authorized.link,
            sub_path: authorized.sub_path,
            scope,
            owner,
            caller: authorized.caller,
        })
    }

    /// `resolve → authenticate → bind` for anonymous reads.
    pub async fn open_read(
        &self,
        raw: &str,
        credentials: &ShareCredentials,
    ) -> AppResult<SharedView> {
        let resolved = self.resolve(raw).await?;
        let authenticated = self.authenticate(resolved, credentials)?;
        self.bind_view(authenticated).await
    }

    /// `resolve → authenticate → authorize → bind` for authenticated writes.
    pub async fn open_write(
        &self,
        raw: &str,
        credentials: &ShareCredentials,
        caller: RequestContext,
    ) -> AppResult<SharedResourceContext> {
        let resolved = self.resolve(raw).await?;
        let authenticated = self.authenticate(resolved, credentials)?;
        let authorized = self.authorize(authenticated, caller)?;
        self.bind(authorized).await
    }

    async fn bind_scope(&self, link: &ShareLink) -> AppResult<(User, ShareScope)> {
        let owner = self.users.get(link.user_id).await?;
        let owner_fs = self.storage.user_fs(&owner).await;
        let scope = self.binder.bind(link, owner_fs).await?;
        Ok((owner, scope))
    }
}
