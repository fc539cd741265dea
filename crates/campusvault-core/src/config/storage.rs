//! Upload storage configuration.

use serde::{Deserialize, Serialize};

/// File storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding uploaded resource blobs.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// Directory holding backup snapshots.
    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,
    /// Maximum upload size in bytes (default 10 MiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Allowed upload extensions (lowercase, including the leading dot).
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            backup_dir: default_backup_dir(),
            max_upload_size_bytes: default_max_upload(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

fn default_upload_dir() -> String {
    "./uploads".to_string()
}

fn default_backup_dir() -> String {
    "./backups".to_string()
}

fn default_max_upload() -> u64 {
    10 * 1024 * 1024
}

fn default_allowed_extensions() -> Vec<String> {
    [".pdf", ".doc", ".docx", ".ppt", ".pptx"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
