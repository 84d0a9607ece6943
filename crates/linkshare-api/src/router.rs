//! Route definitions for the LinkShare HTTP API.
//!
//! All routes are mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, put},
};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = usize::try_from(state.config.storage.max_upload_size_bytes)
        .unwrap_or(usize::MAX);

    let api_routes = Router::new()
        .merge(public_share_routes())
        .merge(share_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(RequestBodyLimitLayer::new(max_upload))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Content access through a link: anonymous reads, authenticated writes
fn public_share_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/public/share/{*path}",
            get(handlers::public::get_shared)
                .post(handlers::public::create_shared)
                .put(handlers::public::modify_shared)
                .delete(handlers::public::delete_shared)
                .patch(handlers::public::transfer_shared),
        )
        .route("/public/dl/{*path}", get(handlers::public::download_shared))
}

/// Link management
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/shares", get(handlers::share::list_shares))
        .route("/publicshares", get(handlers::share::list_public_shares))
        .route(
            "/share/{*path}",
            get(handlers::share::list_path_shares)
                .post(handlers::share::create_share)
                .delete(handlers::share::delete_share),
        )
        .route("/shares/{hash}/public", put(handlers::share::publish_share))
        .route("/shares/{hash}/private", put(handlers::share::unpublish_share))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
