//! Core traits defined in `linkshare-core` and implemented by other crates.

pub mod secret;
pub mod storage;

pub use secret::{RandomSource, SecretHasher};
pub use storage::{ByteStream, FileMeta, FileModes, FileSystem};
