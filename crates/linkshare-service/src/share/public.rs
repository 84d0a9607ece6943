//! Public share endpoints: reading and editing content through a link.

use serde::Serialize;
use tracing::debug;

use linkshare_core::error::ErrorKind;
use linkshare_core::result::AppResult;
use linkshare_core::traits::storage::ByteStream;

use super::archive::zip_directory;
use super::executor::{FileOpExecutor, WriteOutcome};
use super::gate::ShareCredentials;
use super::params::TransferRequest;
use super::pipeline::SharePipeline;
use super::policy::AccessPolicy;
use super::scope::FileInfo;
use crate::context::RequestContext;

/// Share annotations on a public read, computed for the current requester.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharePermissionInfo {
    /// The link hash.
    pub hash: String,
    /// Whether the link is public.
    pub is_public: bool,
    /// `view`, `change`, or empty for private links.
    pub permission: String,
    /// Whether the current requester may write through the link.
    pub can_edit: bool,
}

/// Metadata of the addressed resource plus share annotations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicShareResponse {
    /// The addressed file or directory.
    #[serde(flatten)]
    pub file: FileInfo,
    /// Share annotations.
    pub share_info: SharePermissionInfo,
}

/// A file opened for download.
pub struct Download {
    /// File name for `Content-Disposition`.
    pub name: String,
    /// MIME type.
    pub mime: String,
    /// Length in bytes.
    pub size: u64,
    /// File contents.
    pub stream: ByteStream,
}

impl std::fmt::Debug for Download {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Download")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("size", &self.size)
            .finish()
    }
}

/// Serves public share requests through the share pipeline.
#[derive(Debug, Clone)]
pub struct PublicShareService {
    pipeline: SharePipeline,
    executor: FileOpExecutor,
}

impl PublicShareService {
    /// Creates a new public share service.
    pub fn new(pipeline: SharePipeline, executor: FileOpExecutor) -> Self {
        Self { pipeline, executor }
    }

    /// Describe the resource addressed by `raw` (`"<hash>/<path>"`).
    pub async fn get(
        &self,
        raw: &str,
        credentials: &ShareCredentials,
        caller: Option<&RequestContext>,
    ) -> AppResult<PublicShareResponse> {
        let view = self.pipeline.open_read(raw, credentials).await?;
        let file = self
            .pipeline
            .binder()
            .describe(&view.scope, &view.sub_path)
            .await?;

        let share_info = SharePermissionInfo {
            hash: view.link.hash.clone(),
            is_public: view.link.is_public,
            permission: view
                .link
                .permission
                .map(|p| p.as_str().to_string())
                .unwrap_or_default(),
            can_edit: AccessPolicy::can_edit(&view.link, caller, view.scope.is_dir()),
        };
        Ok(PublicShareResponse { file, share_info })
    }

    /// Open the addressed file for download. Directories are served as a
    /// zip archive named after the directory.
    pub async fn download(&self, raw: &str, credentials: &ShareCredentials) -> AppResult<Download> {
        let view = self.pipeline.open_read(raw, credentials).await?;
        let file = self
            .pipeline
            .binder()
            .describe(&view.scope, &view.sub_path)
            .await?;
        let located = view.scope.require(&view.sub_path, ErrorKind::NotFound)?;

        if file.is_dir {
            let archive = zip_directory(view.scope.view().as_ref(), &located).await?;
            debug!(owner_id = %view.owner.id, path = %located, "Serving share directory archive");
            let size = archive.len() as u64;
            return Ok(Download {
                name: format!("{}.zip", file.name),
                mime: "application/zip".to_string(),
                size,
                stream: Box::pin(futures::stream::once(async move {
                    Ok::<_, std::io::Error>(archive)
                })),
            });
        }

        let stream = view.scope.view().read(&located).await?;
        debug!(owner_id = %view.owner.id, path = %located, "Serving share download");
        Ok(Download {
            name: file.name,
            mime: file.file_type,
            size: file.size,
            stream,
        })
    }

    /// Create a file or directory inside a change-permission share.
    pub async fn create(
        &self,
        raw: &str,
        credentials: &ShareCredentials,
        caller: RequestContext,
        body: ByteStream,
        override_existing: bool,
    ) -> AppResult<WriteOutcome> {
        let ctx = self.pipeline.open_write(raw, credentials, caller).await?;
        self.executor.write(&ctx, body, override_existing).await
    }

    /// Overwrite an existing file inside a change-permission share.
    pub async fn modify(
        &self,
        raw: &str,
        credentials: &ShareCredentials,
        caller: RequestContext,
        body: ByteStream,
    ) -> AppResult<String> {
        let ctx = self.pipeline.open_write(raw, credentials, caller).await?;
        self.executor.modify(&ctx, body).await
    }

    /// Delete a path inside a change-permission share.
    pub async fn delete(
        &self,
        raw: &str,
        credentials: &ShareCredentials,
        caller: RequestContext,
    ) -> AppResult<()> {
        let ctx = self.pipeline.open_write(raw, credentials, caller).await?;
        self.executor.delete(&ctx).await
    }

    /// Copy or move a path inside a change-permission share.
    pub async fn transfer(
        &self,
        raw: &str,
        credentials: &ShareCredentials,
        caller: RequestContext,
        request: &TransferRequest,
    ) -> AppResult<String> {
        let ctx = self.pipeline.open_write(raw, credentials, caller).await?;
        self.executor.transfer(&ctx, request).await
    }
}
