//! Link resolution: splitting a public request path and loading the link.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use linkshare_core::error::AppError;
use linkshare_core::result::AppResult;
use linkshare_database::ShareStore;
use linkshare_entity::share::ShareLink;
use linkshare_storage::path;

/// A public request path split into the link hash and the path inside the
/// share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePath {
    /// First segment of the request path.
    pub hash: String,
    /// Remaining segments as an absolute, cleaned path. Keeps a trailing
    /// slash when the request had one.
    pub sub_path: String,
}

/// Split `"<hash>/<intra path>"` into its parts.
///
/// A bare hash yields `/`. Never panics, whatever the input.
pub fn split_share_path(raw: &str) -> SharePath {
    let Some((hash, rest)) = raw.split_once('/') else {
        return SharePath {
            hash: raw.to_string(),
            sub_path: "/".to_string(),
        };
    };

    let mut sub_path = path::clean(rest);
    if raw.ends_with('/') && !sub_path.ends_with('/') {
        sub_path.push('/');
    }
    SharePath {
        hash: hash.to_string(),
        sub_path,
    }
}

/// A link that exists and has not expired, with the path it was addressed by.
#[derive(Debug, Clone)]
pub struct ResolvedLink {
    /// The link record.
    pub link: ShareLink,
    /// Path inside the share, as produced by [`split_share_path`].
    pub sub_path: String,
}

/// Looks up links by the hash in a public request path.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    shares: Arc<dyn ShareStore>,
}

impl LinkResolver {
    /// Creates a new resolver.
    pub fn new(shares: Arc<dyn ShareStore>) -> Self {
        Self { shares }
    }

    /// Resolve a raw `"<hash>/<intra path>"` string.
    ///
    /// Unknown and expired links are both `NotFound`.
    pub async fn resolve(&self, raw: &str) -> AppResult<ResolvedLink> {
        let SharePath { hash, sub_path } = split_share_path(raw);
        if hash.is_empty() {
            return Err(AppError::not_found("Share link not found"));
        }

        let link = self.shares.get_by_hash(&hash).await?;
        if link.is_expired_at(Utc::now()) {
            debug!(path = %link.path, "Rejected expired share link");
            return Err(AppError::not_found("Share link has expired"));
        }

        Ok(ResolvedLink { link, sub_path })
    }
}
