//! Password gate for protected share links.

use std::sync::Arc;

use constant_time_eq::constant_time_eq;
use tracing::warn;

use linkshare_core::error::{AppError, ErrorKind};
use linkshare_core::result::AppResult;
use linkshare_core::traits::SecretHasher;
use linkshare_entity::share::ShareLink;

use super::params::query_unescape;

/// Secret material a requester presented for a link.
#[derive(Debug, Clone, Default)]
pub struct ShareCredentials {
    /// The `token` query parameter.
    pub token: Option<String>,
    /// The raw `X-SHARE-PASSWORD` header, percent-encoded.
    pub password: Option<String>,
}

/// Decides whether a requester may pass a link's password protection.
#[derive(Debug, Clone)]
pub struct PasswordGate {
    hasher: Arc<dyn SecretHasher>,
}

impl PasswordGate {
    /// Creates a new gate verifying passwords with `hasher`.
    pub fn new(hasher: Arc<dyn SecretHasher>) -> Self {
        Self { hasher }
    }

    /// Check the presented credentials against the link.
    ///
    /// Links without a password always pass. A token exactly equal to the
    /// link's access token passes without a password. Otherwise the decoded
    /// password must verify against the stored hash.
    pub fn check(&self, link: &ShareLink, credentials: &ShareCredentials) -> AppResult<()> {
        if !link.has_password() {
            return Ok(());
        }

        if let Some(token) = credentials.token.as_deref() {
            if !link.token.is_empty() && constant_time_eq(token.as_bytes(), link.token.as_bytes())
            {
                return Ok(());
            }
        }

        let password = query_unescape(credentials.password.as_deref().unwrap_or_default())?;
        if password.is_empty() {
            warn!(path = %link.path, "Share request without password");
            return Err(AppError::unauthorized("Share password required"));
        }

        match self.hasher.verify(&password, &link.password_hash) {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!(path = %link.path, "Share password mismatch");
                Err(AppError::unauthorized("Invalid share password"))
            }
            Err(e) => Err(AppError::with_source(
                ErrorKind::Internal,
                "Share password verification failed",
                e,
            )),
        }
    }
}
