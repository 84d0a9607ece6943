//! A filesystem view confined to one directory of another filesystem.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use linkshare_core::result::AppResult;
use linkshare_core::traits::storage::{ByteStream, FileMeta, FileModes, FileSystem};

use crate::path;

/// Exposes the subtree `base` of `inner` as if it were `/`.
///
/// Every incoming path is cleaned before it is joined to `base`, so no
/// sequence of `..` segments can address anything outside the subtree.
/// Paths in returned metadata are rewritten to be relative to the view.
#[derive(Debug, Clone)]
pub struct BasePathFs {
    inner: Arc<dyn FileSystem>,
    base: String,
}

impl BasePathFs {
    /// Create a view of `inner` rooted at `base`.
    pub fn new(inner: Arc<dyn FileSystem>, base: &str) -> Self {
        Self {
            inner,
            base: path::clean(base),
        }
    }

    /// The directory of the inner filesystem this view exposes.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Translate a view path to the inner filesystem's path.
    pub fn real_path(&self, view_path: &str) -> String {
        path::join(&self.base, &path::clean(view_path))
    }

    fn to_view(&self, mut meta: FileMeta) -> FileMeta {
        meta.path = self.view_path(&meta.path);
        meta
    }

    fn view_path(&self, real_path: &str) -> String {
        if self.base == "/" {
            return path::clean(real_path);
        }
        match real_path.strip_prefix(&self.base) {
            Some(rest) => path::clean(rest),
            None => path::clean(real_path),
        }
    }
}

#[async_trait]
impl FileSystem for BasePathFs {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    async fn stat(&self, path: &str) -> AppResult<FileMeta> {
        let meta = self.inner.stat(&self.real_path(path)).await?;
        Ok(self.to_view(meta))
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        self.inner.exists(&self.real_path(path)).await
    }

    async fn read(&self, path: &str) -> AppResult<ByteStream> {
        self.inner.read(&self.real_path(path)).await
    }

    async fn read_head(&self, path: &str, limit: usize) -> AppResult<Bytes> {
        self.inner.read_head(&self.real_path(path), limit).await
    }

    async fn list(&self, path: &str) -> AppResult<Vec<FileMeta>> {
        let entries = self.inner.list(&self.real_path(path)).await?;
        Ok(entries.into_iter().map(|m| self.to_view(m)).collect())
    }

    async fn write_stream(
        &self,
        path: &str,
        stream: ByteStream,
        modes: FileModes,
    ) -> AppResult<FileMeta> {
        let meta = self
            .inner
            .write_stream(&self.real_path(path), stream, modes)
            .await?;
        Ok(self.to_view(meta))
    }

    async fn mkdir_all(&self, path: &str, mode: u32) -> AppResult<()> {
        self.inner.mkdir_all(&self.real_path(path), mode).await
    }

    async fn remove_all(&self, path: &str) -> AppResult<()> {
        self.inner.remove_all(&self.real_path(path)).await
    }

    async fn rename(&self, from: &str, to: &str) -> AppResult<()> {
        self.inner
            .rename(&self.real_path(from), &self.real_path(to))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::LocalFileSystem;
    use linkshare_core::error::ErrorKind;

    fn body(data: &'static str) -> ByteStream {
        Box::pin(futures::stream::once(async move {
            Ok::<_, std::io::Error>(Bytes::from(data))
        }))
    }

    async fn setup() -> (tempfile::TempDir, Arc<dyn FileSystem>) {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalFileSystem::new(dir.path()).await.unwrap();
        let root: Arc<dyn FileSystem> = Arc::new(local);
        let modes = FileModes::default();
        root.write_stream("/home/alice/docs/a.txt", body("A"), modes)
            .await
            .unwrap();
        root.write_stream("/home/bob/secret.txt", body("B"), modes)
            .await
            .unwrap();
        (dir, root)
    }

    #[tokio::test]
    async fn test_real_path() {
        let (_dir, root) = setup().await;
        let view = BasePathFs::new(root, "/home/alice");
        assert_eq!(view.real_path("/docs"), "/home/alice/docs");
        assert_eq!(view.real_path("/"), "/home/alice");
        assert_eq!(view.real_path("../bob/secret.txt"), "/home/alice/bob/secret.txt");
    }

    #[tokio::test]
    async fn test_view_paths_are_relative() {
        let (_dir, root) = setup().await;
        let view = BasePathFs::new(root, "/home/alice");

        let meta = view.stat("/docs/a.txt").await.unwrap();
        assert_eq!(meta.path, "/docs/a.txt");

        let listed = view.list("/docs").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].path, "/docs/a.txt");
    }

    #[tokio::test]
    async fn test_parent_segments_cannot_escape() {
        let (_dir, root) = setup().await;
        let view = BasePathFs::new(root.clone(), "/home/alice");

        let err = view.stat("/../bob/secret.txt").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        let err = view.stat("docs/../../../bob/secret.txt").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        view.remove_all("/../bob").await.unwrap();
        assert!(root.exists("/home/bob/secret.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_nested_views() {
        let (_dir, root) = setup().await;
        let user: Arc<dyn FileSystem> = Arc::new(BasePathFs::new(root, "/home/alice"));
        let share = BasePathFs::new(user, "/");

        assert!(share.exists("/docs/a.txt").await.unwrap());
        assert_eq!(share.stat("/docs").await.unwrap().path, "/docs");
    }
}
