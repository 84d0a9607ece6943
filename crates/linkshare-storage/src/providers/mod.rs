//! Filesystem driver implementations.

pub mod local;

pub use local::LocalFileSystem;
