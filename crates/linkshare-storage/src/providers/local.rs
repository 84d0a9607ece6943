//! Local filesystem driver.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::StreamExt;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::io::ReaderStream;
use tracing::debug;

use linkshare_core::error::{AppError, ErrorKind};
use linkshare_core::result::AppResult;
use linkshare_core::traits::storage::{ByteStream, FileMeta, FileModes, FileSystem};

use crate::path;

/// Local filesystem driver rooted at a host directory.
#[derive(Debug, Clone)]
pub struct LocalFileSystem {
    /// Host directory that `/` maps to.
    root: PathBuf,
}

impl LocalFileSystem {
    /// Create a new local driver rooted at the given path, creating it if needed.
    pub async fn new(root_path: impl AsRef<Path>) -> AppResult<Self> {
        let root = root_path.as_ref().to_path_buf();
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// The host directory backing `/`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a virtual path to a host path within the root.
    fn resolve(&self, virtual_path: &str) -> PathBuf {
        let clean = path::clean(virtual_path);
        self.root.join(clean.trim_start_matches('/'))
    }

    /// Ensure the parent directory of a host path exists.
    async fn ensure_parent(&self, full_path: &Path, mode: u32) -> AppResult<()> {
        if let Some(parent) = full_path.parent() {
            create_dir_all(parent, mode).await.map_err(|e| {
                AppError::from_io(
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl FileSystem for LocalFileSystem {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn stat(&self, virtual_path: &str) -> AppResult<FileMeta> {
        let full_path = self.resolve(virtual_path);
        let meta = fs::metadata(&full_path)
            .await
            .map_err(|e| AppError::from_io(format!("Failed to stat {virtual_path}"), e))?;
        Ok(to_meta(&path::clean(virtual_path), &meta))
    }

    async fn exists(&self, virtual_path: &str) -> AppResult<bool> {
        let full_path = self.resolve(virtual_path);
        fs::try_exists(&full_path)
            .await
            .map_err(|e| AppError::from_io(format!("Failed to probe {virtual_path}"), e))
    }

    async fn read(&self, virtual_path: &str) -> AppResult<ByteStream> {
        let full_path = self.resolve(virtual_path);
        let file = fs::File::open(&full_path)
            .await
            .map_err(|e| AppError::from_io(format!("Failed to open file {virtual_path}"), e))?;

        let stream = ReaderStream::new(file);
        Ok(Box::pin(stream))
    }

    async fn read_head(&self, virtual_path: &str, limit: usize) -> AppResult<Bytes> {
        let full_path = self.resolve(virtual_path);
        let file = fs::File::open(&full_path)
            .await
            .map_err(|e| AppError::from_io(format!("Failed to open file {virtual_path}"), e))?;

        let mut buf = Vec::with_capacity(limit.min(64 * 1024));
        file.take(limit as u64)
            .read_to_end(&mut buf)
            .await
            .map_err(|e| AppError::from_io(format!("Failed to read file {virtual_path}"), e))?;
        Ok(Bytes::from(buf))
    }

    async fn list(&self, virtual_path: &str) -> AppResult<Vec<FileMeta>> {
        let dir_path = path::clean(virtual_path);
        let full_path = self.resolve(&dir_path);

        let mut dir = fs::read_dir(&full_path)
            .await
            .map_err(|e| AppError::from_io(format!("Failed to list directory {dir_path}"), e))?;

        let mut entries = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| AppError::from_io("Failed to read directory entry", e))?
        {
            let entry_meta = entry
                .metadata()
                .await
                .map_err(|e| AppError::from_io("Failed to get entry metadata", e))?;

            let name = entry.file_name().to_string_lossy().to_string();
            entries.push(to_meta(&path::join(&dir_path, &name), &entry_meta));
        }

        entries.sort_by(|a, b| {
            b.is_directory
                .cmp(&a.is_directory)
                .then(a.name.cmp(&b.name))
        });

        Ok(entries)
    }

    async fn write_stream(
        &self,
        virtual_path: &str,
        mut stream: ByteStream,
        modes: FileModes,
    ) -> AppResult<FileMeta> {
        let full_path = self.resolve(virtual_path);
        self.ensure_parent(&full_path, modes.dir).await?;

        let mut file = fs::File::create(&full_path)
            .await
            .map_err(|e| AppError::from_io(format!("Failed to create file {virtual_path}"), e))?;

        let mut total_bytes = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk
                .map_err(|e| AppError::with_source(ErrorKind::Storage, "Stream read error", e))?;
            total_bytes += chunk.len() as u64;
            file.write_all(&chunk)
                .await
                .map_err(|e| AppError::from_io("Failed to write chunk", e))?;
        }

        file.flush()
            .await
            .map_err(|e| AppError::from_io("Failed to flush file", e))?;
        drop(file);

        set_mode(&full_path, modes.file)
            .await
            .map_err(|e| AppError::from_io(format!("Failed to set mode on {virtual_path}"), e))?;

        debug!(path = virtual_path, bytes = total_bytes, "Wrote file from stream");
        self.stat(virtual_path).await
    }

    async fn mkdir_all(&self, virtual_path: &str, mode: u32) -> AppResult<()> {
        let full_path = self.resolve(virtual_path);
        create_dir_all(&full_path, mode).await.map_err(|e| {
            AppError::from_io(format!("Failed to create directory {virtual_path}"), e)
        })?;
        debug!(path = virtual_path, "Created directory");
        Ok(())
    }

    async fn remove_all(&self, virtual_path: &str) -> AppResult<()> {
        let full_path = self.resolve(virtual_path);
        let meta = match fs::symlink_metadata(&full_path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(AppError::from_io(format!("Failed to stat {virtual_path}"), e));
            }
        };

        let result = if meta.is_dir() {
            fs::remove_dir_all(&full_path).await
        } else {
            fs::remove_file(&full_path).await
        };
        result.map_err(|e| AppError::from_io(format!("Failed to delete {virtual_path}"), e))?;

        debug!(path = virtual_path, "Removed path");
        Ok(())
    }

    async fn rename(&self, from: &str, to: &str) -> AppResult<()> {
        let from_path = self.resolve(from);
        let to_path = self.resolve(to);

        fs::rename(&from_path, &to_path)
            .await
            .map_err(|e| AppError::from_io(format!("Failed to rename {from} -> {to}"), e))?;
        debug!(from, to, "Renamed path");
        Ok(())
    }
}

fn to_meta(virtual_path: &str, meta: &std::fs::Metadata) -> FileMeta {
    let modified = meta
        .modified()
        .map(chrono::DateTime::<chrono::Utc>::from)
        .unwrap_or_else(|_| chrono::Utc::now());

    FileMeta {
        name: path::base_name(virtual_path),
        path: virtual_path.to_string(),
        size_bytes: meta.len(),
        modified,
        is_directory: meta.is_dir(),
        mode: mode_of(meta),
    }
}

#[cfg(unix)]
fn mode_of(meta: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn mode_of(_meta: &std::fs::Metadata) -> u32 {
    0
}

#[cfg(unix)]
async fn create_dir_all(full_path: &Path, mode: u32) -> std::io::Result<()> {
    fs::DirBuilder::new()
        .recursive(true)
        .mode(mode)
        .create(full_path)
        .await
}

#[cfg(not(unix))]
async fn create_dir_all(full_path: &Path, _mode: u32) -> std::io::Result<()> {
    fs::create_dir_all(full_path).await
}

#[cfg(unix)]
async fn set_mode(full_path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(full_path, std::fs::Permissions::from_mode(mode)).await
}

#[cfg(not(unix))]
async fn set_mode(_full_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}
