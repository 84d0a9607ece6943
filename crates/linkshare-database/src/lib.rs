//! # linkshare-database
//!
//! Record stores for share links and users. The share subsystem talks to
//! the [`ShareStore`] and [`UserStore`] traits; the repositories in this
//! crate keep records in concurrent in-memory maps.

pub mod repositories;
pub mod store;

pub use repositories::{ShareRepository, UserRepository};
pub use store::{ShareStore, UserStore};
