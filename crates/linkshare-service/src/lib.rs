//! # linkshare-service
//!
//! Business logic for share links. Public requests flow through a typed
//! pipeline (`resolve → authenticate → authorize → bind`) built from
//! [`share::LinkResolver`], [`share::PasswordGate`], [`share::AccessPolicy`]
//! and [`share::ScopeBinder`]; mutations then run in
//! [`share::FileOpExecutor`] against the confined view. Link records are
//! managed by [`share::ShareService`].
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod share;

pub use context::RequestContext;
pub use share::{PublicShareService, ShareService};
