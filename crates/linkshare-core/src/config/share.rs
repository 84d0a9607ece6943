//! Share link configuration.

use serde::{Deserialize, Serialize};

use crate::traits::storage::FileModes;

/// Settings for share link creation and scoped file operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Permission bits for files created through a share.
    #[serde(default = "default_file_mode")]
    pub file_mode: u32,
    /// Permission bits for directories created through a share.
    #[serde(default = "default_dir_mode")]
    pub dir_mode: u32,
    /// Sniff the first bytes of shared files to detect their type instead
    /// of relying on the extension alone.
    #[serde(default)]
    pub type_detection_by_header: bool,
    /// Random bytes behind a link hash.
    #[serde(default = "default_hash_bytes")]
    pub hash_bytes: usize,
    /// Random bytes behind an access token.
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,
    /// Upper bound on candidate names tried in rename mode.
    #[serde(default = "default_max_rename_attempts")]
    pub max_rename_attempts: u32,
}

impl ShareConfig {
    /// Returns the configured creation modes.
    pub fn modes(&self) -> FileModes {
        FileModes {
            file: self.file_mode,
            dir: self.dir_mode,
        }
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            file_mode: default_file_mode(),
            dir_mode: default_dir_mode(),
            type_detection_by_header: false,
            hash_bytes: default_hash_bytes(),
            token_bytes: default_token_bytes(),
            max_rename_attempts: default_max_rename_attempts(),
        }
    }
}

fn default_file_mode() -> u32 {
    0o640
}

fn default_dir_mode() -> u32 {
    0o750
}

fn default_hash_bytes() -> usize {
    6
}

fn default_token_bytes() -> usize {
    96
}

fn default_max_rename_attempts() -> u32 {
    10_000
}
