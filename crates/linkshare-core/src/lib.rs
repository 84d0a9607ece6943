//! # linkshare-core
//!
//! Core crate for LinkShare. Contains the collaborator traits the share
//! subsystem is written against (filesystem, secret hashing, randomness),
//! configuration schemas, typed identifiers, and the unified error system.
//!
//! This crate has **no** internal dependencies on other LinkShare crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
