//! Filesystem trait the share subsystem performs all I/O through.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::Stream;

use crate::result::AppResult;

/// Metadata about a file or directory.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FileMeta {
    /// Final path component (empty for the root of a filesystem).
    pub name: String,
    /// Path within the filesystem that produced this entry, always absolute.
    pub path: String,
    /// Size in bytes (0 for directories on most drivers).
    pub size_bytes: u64,
    /// Last modified timestamp.
    pub modified: DateTime<Utc>,
    /// Whether this is a directory.
    pub is_directory: bool,
    /// Permission bits as reported by the driver (0 when unknown).
    pub mode: u32,
}

/// Permission bits applied to newly created files and directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileModes {
    /// Mode for created files.
    pub file: u32,
    /// Mode for created directories.
    pub dir: u32,
}

impl Default for FileModes {
    fn default() -> Self {
        Self {
            file: 0o640,
            dir: 0o750,
        }
    }
}

/// A byte stream type used for reading and writing file contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Trait for filesystem drivers.
///
/// Every path is interpreted as absolute within the filesystem (`"a/b"` and
/// `"/a/b"` address the same entry) and implementations must never resolve a
/// path above their own root, whatever `..` segments it contains.
#[async_trait]
pub trait FileSystem: Send + Sync + std::fmt::Debug + 'static {
    /// Return the driver type name (e.g., "local", "basepath").
    fn provider_type(&self) -> &str;

    /// Get metadata about a file or directory; `NotFound` when missing.
    async fn stat(&self, path: &str) -> AppResult<FileMeta>;

    /// Check whether a file or directory exists at the given path.
    async fn exists(&self, path: &str) -> AppResult<bool>;

    /// Open a file and return its byte stream.
    async fn read(&self, path: &str) -> AppResult<ByteStream>;

    /// Read at most `limit` bytes from the start of a file.
    async fn read_head(&self, path: &str, limit: usize) -> AppResult<Bytes>;

    /// List the direct children of a directory.
    async fn list(&self, path: &str) -> AppResult<Vec<FileMeta>>;

    /// Create or truncate a file and fill it from `stream`, creating missing
    /// parent directories. Returns the metadata of the written file.
    async fn write_stream(
        &self,
        path: &str,
        stream: ByteStream,
        modes: FileModes,
    ) -> AppResult<FileMeta>;

    /// Create a directory and any missing parents; succeeds if it exists.
    async fn mkdir_all(&self, path: &str, mode: u32) -> AppResult<()>;

    /// Remove a file, or a directory and all its contents. Missing paths
    /// are not an error.
    async fn remove_all(&self, path: &str) -> AppResult<()>;

    /// Rename a file or directory. The destination's parent must exist.
    async fn rename(&self, from: &str, to: &str) -> AppResult<()>;
}
