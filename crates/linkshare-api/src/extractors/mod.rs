//! Custom Axum extractors.

pub mod auth;
pub mod share;

pub use auth::{AuthUser, OptionalAuthUser};
pub use share::ShareAccess;
