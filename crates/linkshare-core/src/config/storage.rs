//! Filesystem driver configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory of the local filesystem driver. Every user's scope
    /// is a sub-tree of this directory.
    #[serde(default = "default_root")]
    pub root_path: String,
    /// Maximum request body size for uploads into shares (default 5 GB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_root() -> String {
    "./data/files".to_string()
}

fn default_max_upload() -> u64 {
    5_368_709_120 // 5 GB
}
