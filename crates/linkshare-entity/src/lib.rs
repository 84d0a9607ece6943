//! # linkshare-entity
//!
//! Domain entity models for LinkShare. Every struct in this crate is either
//! a stored record (share links, users) or a request body consumed by the
//! share services. All entities derive `Debug`, `Clone`, `Serialize` and
//! `Deserialize`.

pub mod share;
pub mod user;
