//! Confinement of a share link to a view of its owner's filesystem.
//!
//! A link's view is the owner's filesystem rebased onto the parent of the
//! shared path, so a shared directory stays addressable by its own name
//! (`/docs/...`) and a shared file by `/<file name>`. Request paths are
//! mapped onto the view by [`ShareScope::locate`]; anything that does not
//! lie under the shared resource is refused, so siblings of the shared
//! path remain unreachable even though they exist in the view.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use linkshare_core::error::{AppError, ErrorKind};
use linkshare_core::result::AppResult;
use linkshare_core::traits::storage::{FileMeta, FileSystem};
use linkshare_entity::share::ShareLink;
use linkshare_storage::{BasePathFs, mime, path};

/// Metadata of a file or directory as seen through a share.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    /// Path inside the confined view.
    pub path: String,
    /// Display name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Extension including the dot, empty for none.
    pub extension: String,
    /// Last modification time.
    pub modified: DateTime<Utc>,
    /// Permission bits.
    pub mode: u32,
    /// Whether this is a directory.
    pub is_dir: bool,
    /// `directory` or a MIME type.
    #[serde(rename = "type")]
    pub file_type: String,
    /// Directory entries, directories first then by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<FileInfo>>,
    /// Number of subdirectories in `items`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_dirs: Option<usize>,
    /// Number of files in `items`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_files: Option<usize>,
}

impl FileInfo {
    fn from_meta(meta: FileMeta, file_type: String) -> Self {
        let extension = if meta.is_directory {
            String::new()
        } else {
            path::split_ext(&meta.name).1.to_string()
        };
        Self {
            path: meta.path,
            name: meta.name,
            size: meta.size_bytes,
            extension,
            modified: meta.modified,
            mode: meta.mode,
            is_dir: meta.is_directory,
            file_type,
            items: None,
            num_dirs: None,
            num_files: None,
        }
    }
}

/// A link bound to its confined view.
#[derive(Debug, Clone)]
pub struct ShareScope {
    view: Arc<dyn FileSystem>,
    /// Path of the shared resource inside `view`.
    root: String,
    /// Name shown for the shared directory.
    display_name: String,
    is_dir: bool,
    /// Type of the shared resource, detected on the real path.
    root_type: String,
}

impl ShareScope {
    /// The confined view. Only paths returned by [`Self::locate`] may be
    /// used against it.
    pub fn view(&self) -> &Arc<dyn FileSystem> {
        &self.view
    }

    /// Whether the shared resource is a directory.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Path of the shared resource inside the view.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Map a request sub-path to a path inside the view.
    ///
    /// For directory shares `/` maps to the shared directory and other
    /// paths must lie under it. For file shares every sub-path maps to the
    /// shared file. Returns `None` for paths outside the share.
    pub fn locate(&self, sub_path: &str) -> Option<String> {
        if !self.is_dir {
            return Some(self.root.clone());
        }
        let cleaned = path::clean(sub_path);
        if cleaned == "/" {
            return Some(self.root.clone());
        }
        path::is_within(&cleaned, &self.root).then_some(cleaned)
    }

    /// Like [`Self::locate`], with paths outside the share reported as
    /// `kind`.
    pub fn require(&self, sub_path: &str, kind: ErrorKind) -> AppResult<String> {
        self.locate(sub_path)
            .ok_or_else(|| AppError::new(kind, "Path is outside the shared resource"))
    }

    /// Whether a located path is the shared resource itself.
    pub fn is_root(&self, located: &str) -> bool {
        path::clean(located) == self.root
    }
}

/// Binds links to confined views and describes what they expose.
#[derive(Debug, Clone)]
pub struct ScopeBinder {
    type_detection_by_header: bool,
}

impl ScopeBinder {
    /// Creates a binder; `type_detection_by_header` enables content sniffing.
    pub fn new(type_detection_by_header: bool) -> Self {
        Self {
            type_detection_by_header,
        }
    }

    /// Probe the shared path in the owner's filesystem and build the
    /// confined view over its parent.
    pub async fn bind(
        &self,
        link: &ShareLink,
        owner_fs: Arc<dyn FileSystem>,
    ) -> AppResult<ShareScope> {
        let real_path = path::clean(&link.path);
        let meta = owner_fs.stat(&real_path).await?;
        let root_type = self
            .detect_type(owner_fs.as_ref(), &real_path, &meta, self.type_detection_by_header)
            .await?;

        let base = path::parent(&real_path);
        let view: Arc<dyn FileSystem> = Arc::new(BasePathFs::new(owner_fs, &base));
        let root = path::join("/", &path::base_name(&real_path));
        let display_name = path::base_name(link.path.trim_end_matches('/'));

        debug!(path = %real_path, is_dir = meta.is_directory, "Bound share scope");
        Ok(ShareScope {
            view,
            root,
            display_name,
            is_dir: meta.is_directory,
            root_type,
        })
    }

    /// Describe the resource a read request addresses. Directories include
    /// their entries.
    pub async fn describe(&self, scope: &ShareScope, sub_path: &str) -> AppResult<FileInfo> {
        let located = scope.require(sub_path, ErrorKind::NotFound)?;
        let fs = scope.view.as_ref();
        let meta = fs.stat(&located).await?;

        if !meta.is_directory {
            let file_type = if scope.is_root(&located) {
                scope.root_type.clone()
            } else {
                self.detect_type(fs, &located, &meta, self.type_detection_by_header)
                    .await?
            };
            return Ok(FileInfo::from_meta(meta, file_type));
        }

        let mut entries = fs.list(&located).await?;
        entries.sort_by(|a, b| {
            b.is_directory
                .cmp(&a.is_directory)
                .then_with(|| a.name.cmp(&b.name))
        });

        let mut items = Vec::with_capacity(entries.len());
        for entry in entries {
            // Entries are typed by extension only; sniffing every child is too costly.
            let file_type = self.detect_type(fs, &entry.path, &entry, false).await?;
            items.push(FileInfo::from_meta(entry, file_type));
        }

        let mut info = FileInfo::from_meta(meta, "directory".to_string());
        if scope.is_root(&located) && !scope.display_name.is_empty() {
            info.name = scope.display_name.clone();
        }
        let num_dirs = items.iter().filter(|i| i.is_dir).count();
        info.num_dirs = Some(num_dirs);
        info.num_files = Some(items.len() - num_dirs);
        info.items = Some(items);
        Ok(info)
    }

    async fn detect_type(
        &self,
        fs: &dyn FileSystem,
        file_path: &str,
        meta: &FileMeta,
        by_header: bool,
    ) -> AppResult<String> {
        if meta.is_directory {
            return Ok("directory".to_string());
        }
        if let Some(mime) = mime::mime_from_path(file_path) {
            return Ok(mime);
        }
        if by_header {
            let head = fs.read_head(file_path, mime::SNIFF_LEN).await?;
            if let Some(mime) = mime::sniff(&head) {
                return Ok(mime);
            }
        }
        Ok("application/octet-stream".to_string())
    }
}
