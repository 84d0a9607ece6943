//! File operations inside a confined share view.

use tracing::{debug, info};

use linkshare_core::error::{AppError, ErrorKind};
use linkshare_core::result::AppResult;
use linkshare_core::traits::storage::{ByteStream, FileMeta, FileModes, FileSystem};
use linkshare_storage::path;

use super::params::{TransferAction, TransferRequest, query_unescape};
use super::pipeline::SharedResourceContext;

/// Result of a create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A directory was created or already existed.
    Directory,
    /// A file was written; carries its validator.
    File {
        /// Opaque validator derived from modification time and size.
        etag: String,
    },
}

/// Build the validator of a written file.
pub fn etag(meta: &FileMeta) -> String {
    let nanos = meta.modified.timestamp_nanos_opt().unwrap_or_default();
    format!("\"{:x}{:x}\"", nanos, meta.size_bytes)
}

/// Performs writes, deletes, copies and moves against a [`SharedResourceContext`].
///
/// Every path comes from [`super::scope::ShareScope::locate`], so nothing
/// here ever sees a path outside the shared resource.
#[derive(Debug, Clone)]
pub struct FileOpExecutor {
    modes: FileModes,
    max_rename_attempts: u32,
}

impl FileOpExecutor {
    /// Creates an executor applying `modes` to everything it creates.
    pub fn new(modes: FileModes, max_rename_attempts: u32) -> Self {
        Self {
            modes,
            max_rename_attempts,
        }
    }

    /// Create a file, or a directory when the sub-path ends with `/`. The
    /// shared directory itself is never a create target.
    pub async fn write(
        &self,
        ctx: &SharedResourceContext,
        body: ByteStream,
        override_existing: bool,
    ) -> AppResult<WriteOutcome> {
        let target = ctx.scope.require(&ctx.sub_path, ErrorKind::Forbidden)?;
        let fs = ctx.scope.view().as_ref();

        if ctx.scope.is_root(&target) {
            return Err(AppError::method_not_allowed(
                "Cannot create over the shared directory",
            ));
        }

        if ctx.sub_path.ends_with('/') {
            fs.mkdir_all(&target, self.modes.dir).await?;
            info!(user_id = %ctx.caller.user_id, path = %target, "Created directory in share");
            return Ok(WriteOutcome::Directory);
        }

        match fs.stat(&target).await {
            Ok(meta) if meta.is_directory => {
                return Err(AppError::method_not_allowed("Target is a directory"));
            }
            Ok(_) if !override_existing => {
                return Err(AppError::conflict("File already exists"));
            }
            Ok(_) => {}
            Err(e) if e.is(ErrorKind::NotFound) => {}
            Err(e) => return Err(e),
        }

        let meta = fs.write_stream(&target, body, self.modes).await?;
        info!(
            user_id = %ctx.caller.user_id,
            path = %target,
            bytes = meta.size_bytes,
            "Wrote file in share"
        );
        Ok(WriteOutcome::File { etag: etag(&meta) })
    }

    /// Overwrite an existing file.
    pub async fn modify(&self, ctx: &SharedResourceContext, body: ByteStream) -> AppResult<String> {
        let target = ctx.scope.require(&ctx.sub_path, ErrorKind::Forbidden)?;
        if path::clean(&ctx.sub_path) == "/" || ctx.scope.is_root(&target) {
            return Err(AppError::validation("Cannot modify the shared directory"));
        }
        if ctx.sub_path.ends_with('/') {
            return Err(AppError::method_not_allowed("Cannot modify a directory"));
        }

        let fs = ctx.scope.view().as_ref();
        if fs.stat(&target).await?.is_directory {
            return Err(AppError::method_not_allowed("Cannot modify a directory"));
        }

        let meta = fs.write_stream(&target, body, self.modes).await?;
        info!(
            user_id = %ctx.caller.user_id,
            path = %target,
            bytes = meta.size_bytes,
            "Modified file in share"
        );
        Ok(etag(&meta))
    }

    /// Delete a file or directory tree. The shared directory itself cannot
    /// be deleted; missing targets are not an error.
    pub async fn delete(&self, ctx: &SharedResourceContext) -> AppResult<()> {
        let target = ctx.scope.require(&ctx.sub_path, ErrorKind::Forbidden)?;
        if path::clean(&ctx.sub_path) == "/" || ctx.scope.is_root(&target) {
            return Err(AppError::forbidden("Cannot delete the root of a share"));
        }

        ctx.scope.view().remove_all(&target).await?;
        info!(user_id = %ctx.caller.user_id, path = %target, "Deleted path in share");
        Ok(())
    }

    /// Copy or move the addressed path. Returns the destination actually used.
    pub async fn transfer(
        &self,
        ctx: &SharedResourceContext,
        request: &TransferRequest,
    ) -> AppResult<String> {
        let destination = query_unescape(&request.destination)?;
        if destination.is_empty() {
            return Err(AppError::validation("Missing destination"));
        }

        let src = ctx.scope.require(&ctx.sub_path, ErrorKind::Forbidden)?;
        let mut dst = ctx.scope.require(&destination, ErrorKind::Forbidden)?;
        if path::clean(&ctx.sub_path) == "/"
            || path::clean(&destination) == "/"
            || ctx.scope.is_root(&src)
            || ctx.scope.is_root(&dst)
        {
            return Err(AppError::forbidden("Cannot move or copy the root of a share"));
        }
        let same = src == dst;
        if !same && (path::is_within(&dst, &src) || path::is_within(&src, &dst)) {
            return Err(AppError::validation(
                "Source and destination cannot contain each other",
            ));
        }

        let fs = ctx.scope.view().as_ref();
        if request.rename {
            dst = self.free_name(fs, &dst).await?;
        } else if same {
            return Err(AppError::conflict("Destination is the source"));
        } else if !request.override_existing && fs.exists(&dst).await? {
            return Err(AppError::conflict("Destination already exists"));
        }

        match request.action {
            TransferAction::Copy => self.copy(fs, &src, &dst).await?,
            TransferAction::Move => {
                fs.stat(&src).await?;
                fs.mkdir_all(&path::parent(&dst), self.modes.dir).await?;
                fs.rename(&src, &dst).await?;
            }
        }

        info!(
            user_id = %ctx.caller.user_id,
            from = %src,
            to = %dst,
            action = ?request.action,
            "Transferred path in share"
        );
        Ok(dst)
    }

    /// First of `name`, `name(1)`, `name(2)`, … that does not exist.
    async fn free_name(&self, fs: &dyn FileSystem, target: &str) -> AppResult<String> {
        if !fs.exists(target).await? {
            return Ok(target.to_string());
        }

        let dir = path::parent(target);
        let name = path::base_name(target);
        let (stem, ext) = path::split_ext(&name);
        for n in 1..=self.max_rename_attempts {
            let candidate = path::join(&dir, &format!("{stem}({n}){ext}"));
            if !fs.exists(&candidate).await? {
                return Ok(candidate);
            }
        }
        Err(AppError::conflict("No free destination name"))
    }

    /// Depth-first copy: each directory is created before its files.
    async fn copy(&self, fs: &dyn FileSystem, src: &str, dst: &str) -> AppResult<()> {
        let root = fs.stat(src).await?;
        if !root.is_directory {
            return self.copy_file(fs, src, dst).await;
        }

        let mut pending = vec![(src.to_string(), dst.to_string())];
        while let Some((from, to)) = pending.pop() {
            fs.mkdir_all(&to, self.modes.dir).await?;
            for entry in fs.list(&from).await? {
                let target = path::join(&to, &entry.name);
                if entry.is_directory {
                    pending.push((entry.path, target));
                } else {
                    self.copy_file(fs, &entry.path, &target).await?;
                }
            }
        }
        Ok(())
    }

    async fn copy_file(&self, fs: &dyn FileSystem, src: &str, dst: &str) -> AppResult<()> {
        let stream = fs.read(src).await?;
        fs.write_stream(dst, stream, self.modes).await?;
        debug!(from = src, to = dst, "Copied file");
        Ok(())
    }
}
