//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use linkshare_auth::{JwtDecoder, JwtEncoder};
use linkshare_core::config::AppConfig;
use linkshare_database::{ShareStore, UserStore};
use linkshare_service::{PublicShareService, ShareService};
use linkshare_storage::StorageManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// When the server started
    pub started_at: Instant,

    // ── Infrastructure ───────────────────────────────────────
    /// Storage manager handing out user filesystems
    pub storage_manager: Arc<StorageManager>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Stores ───────────────────────────────────────────────
    /// User store
    pub user_repo: Arc<dyn UserStore>,
    /// Share link store
    pub share_repo: Arc<dyn ShareStore>,

    // ── Services ─────────────────────────────────────────────
    /// Share link management
    pub share_service: Arc<ShareService>,
    /// Content access through share links
    pub public_share_service: Arc<PublicShareService>,
}
