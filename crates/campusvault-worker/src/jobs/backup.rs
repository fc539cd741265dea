//! Nightly backup job handler.

use std::sync::Arc;

use serde_json::Value;
use tracing;

use campusvault_service::backup::service::BackupService;

/// Runs the scheduled backup.
#[derive(Debug, Clone)]
pub struct BackupJobHandler {
    /// Backup service.
    backup: Arc<BackupService>,
}

impl BackupJobHandler {
    /// Create a new backup job handler.
    pub fn new(backup: Arc<BackupService>) -> Self {
        Self { backup }
    }

    /// Create a snapshot, returning a structured result for logging.
    pub async fn run(&self) -> Result<Value, String> {
        tracing::info!("Running scheduled backup");

        let summary = self
            .backup
            .create_backup()
            .await
            .map_err(|e| format!("Scheduled backup failed: {e}"))?;

        tracing::info!(
            name = %summary.name,
            files = summary.file_count,
            "Scheduled backup completed"
        );

        Ok(serde_json::json!({
            "task": "backup",
            "name": summary.name,
            "files": summary.file_count,
            "resources": summary.record_counts.resources,
        }))
    }
}
