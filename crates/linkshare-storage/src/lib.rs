//! # linkshare-storage
//!
//! Filesystem drivers for LinkShare: the local driver, the base-path view
//! that confines a filesystem to one of its sub-trees, and the manager that
//! hands out each user's own filesystem.

pub mod base_path;
pub mod manager;
pub mod mime;
pub mod path;
pub mod providers;

pub use base_path::BasePathFs;
pub use manager::StorageManager;
