//! # linkshare-api
//!
//! HTTP API layer for LinkShare built on Axum.
//!
//! Provides the public share endpoints, the link management endpoints,
//! request logging middleware, extractors, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use state::AppState;
