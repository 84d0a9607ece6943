//! Application builder: wires stores, services and router into an Axum app.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;

use linkshare_auth::{JwtDecoder, JwtEncoder, OsRandom, PasswordHasher};
use linkshare_core::config::AppConfig;
use linkshare_core::error::{AppError, ErrorKind};
use linkshare_core::traits::FileSystem;
use linkshare_database::{ShareRepository, ShareStore, UserRepository, UserStore};
use linkshare_entity::user::User;
use linkshare_service::share::{FileOpExecutor, LinkService, SharePipeline};
use linkshare_service::{PublicShareService, ShareService};
use linkshare_storage::StorageManager;
use linkshare_storage::providers::LocalFileSystem;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Builds the application state from configuration and seeds the user store.
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    // ── Storage ──────────────────────────────────────────────────
    let root: Arc<dyn FileSystem> = Arc::new(LocalFileSystem::new(&config.storage.root_path).await?);
    let storage_manager = Arc::new(StorageManager::new(root));
    tracing::info!(root = %config.storage.root_path, "Storage initialized");

    // ── Stores ───────────────────────────────────────────────────
    let user_repo: Arc<dyn UserStore> = Arc::new(UserRepository::new());
    let share_repo: Arc<dyn ShareStore> = Arc::new(ShareRepository::new());

    for seed in &config.users {
        let user = User::try_from(seed)?;
        storage_manager
            .ensure_scope(&user, config.share.dir_mode)
            .await?;
        tracing::info!(user_id = %user.id, username = %user.username, scope = %user.scope, "Seeded user");
        user_repo.insert(user).await?;
    }

    // ── Auth ─────────────────────────────────────────────────────
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
    let password_hasher = Arc::new(PasswordHasher::new());

    // ── Services ─────────────────────────────────────────────────
    let link_service = LinkService::new(
        Arc::new(OsRandom),
        config.share.hash_bytes,
        config.share.token_bytes,
    );
    let share_service = Arc::new(ShareService::new(
        Arc::clone(&share_repo),
        Arc::clone(&user_repo),
        Arc::clone(&storage_manager),
        password_hasher.clone(),
        link_service,
    ));

    let pipeline = SharePipeline::new(
        Arc::clone(&share_repo),
        Arc::clone(&user_repo),
        Arc::clone(&storage_manager),
        password_hasher,
        config.share.type_detection_by_header,
    );
    let executor = FileOpExecutor::new(config.share.modes(), config.share.max_rename_attempts);
    let public_share_service = Arc::new(PublicShareService::new(pipeline, executor));

    Ok(AppState {
        config: Arc::new(config),
        started_at: Instant::now(),
        storage_manager,
        jwt_encoder,
        jwt_decoder,
        user_repo,
        share_repo,
        share_service,
        public_share_service,
    })
}

/// Runs the LinkShare server until Ctrl+C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    let addr = config.server.bind_address();
    let state = build_state(config).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e))?;

    tracing::info!("LinkShare server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
