//! Backup/restore orchestration.
//!
//! Snapshots live under the configured backup directory, one subdirectory
//! per snapshot. Restore is destructive: it first takes a pre-restore
//! safety export, then replaces subjects/resources/downloads in one
//! transaction (users survive) and copies blobs back.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tokio::fs;
use tracing::{info, warn};

use campusvault_core::error::AppError;
use campusvault_database::repositories::backup::BackupRepository;
use campusvault_storage::UploadStore;

use super::manifest::{
    backup_name, BackupManifest, BackupMetadata, DatabaseBackup, RecordCounts,
    BACKUP_FORMAT_VERSION,
};

/// Summary of a created snapshot.
#[derive(Debug, Clone)]
pub struct BackupSummary {
    /// Snapshot directory name.
    pub name: String,
    /// Row counts captured.
    pub record_counts: RecordCounts,
    /// Blob files captured.
    pub file_count: usize,
}

/// Creates, lists, and restores snapshots.
#[derive(Clone)]
pub struct BackupService {
    /// Whole-table export/restore.
    backup_repo: Arc<BackupRepository>,
    /// Blob store.
    store: Arc<UploadStore>,
    /// Snapshot root directory.
    backup_dir: PathBuf,
}

impl std::fmt::Debug for BackupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackupService")
            .field("backup_dir", &self.backup_dir)
            .finish()
    }
}

impl BackupService {
    /// Creates a new backup service.
    pub fn new(backup_repo: Arc<BackupRepository>, store: Arc<UploadStore>, backup_dir: &str) -> Self {
        Self {
            backup_repo,
            store,
            backup_dir: PathBuf::from(backup_dir),
        }
    }

    /// Creates a new snapshot and returns its summary.
    pub async fn create_backup(&self) -> Result<BackupSummary, AppError> {
        let name = backup_name(Utc::now());
        let snapshot_dir = self.backup_dir.join(&name);

        info!(name = %name, "Starting backup");

        let result = self.write_snapshot(&snapshot_dir, &name).await;

        match result {
            Ok(summary) => {
                info!(
                    name = %summary.name,
                    files = summary.file_count,
                    resources = summary.record_counts.resources,
                    "Backup completed"
                );
                Ok(summary)
            }
            Err(e) => {
                // Remove the half-written snapshot so it can't be restored.
                if let Err(cleanup) = fs::remove_dir_all(&snapshot_dir).await {
                    if cleanup.kind() != std::io::ErrorKind::NotFound {
                        warn!(error = %cleanup, "Failed to remove incomplete snapshot");
                    }
                }
                Err(e)
            }
        }
    }

    async fn write_snapshot(
        &self,
        snapshot_dir: &Path,
        name: &str,
    ) -> Result<BackupSummary, AppError> {
        fs::create_dir_all(snapshot_dir).await?;

        // Table dump.
        let dump = self.backup_repo.export_all().await?;
        let record_counts = RecordCounts::from_dump(&dump);

        let database_backup = DatabaseBackup {
            metadata: BackupMetadata {
                backup_date: Utc::now(),
                version: BACKUP_FORMAT_VERSION.to_string(),
                record_counts,
            },
            data: dump,
        };

        let json = serde_json::to_vec_pretty(&database_backup)?;
        fs::write(snapshot_dir.join("database.json"), json).await?;

        // Blob copies.
        let files_dir = snapshot_dir.join("files");
        fs::create_dir_all(&files_dir).await?;

        let blobs = self.store.list_blobs().await?;
        for blob in &blobs {
            let data = self.store.read_blob(&blob.path).await?;
            fs::write(files_dir.join(&blob.path), data).await?;
        }

        // Manifest last: its presence marks the snapshot complete.
        let manifest = BackupManifest {
            name: name.to_string(),
            created: Utc::now(),
            version: BACKUP_FORMAT_VERSION.to_string(),
            file_count: blobs.len(),
        };
        let manifest_json = serde_json::to_vec_pretty(&manifest)?;
        fs::write(snapshot_dir.join("manifest.json"), manifest_json).await?;

        Ok(BackupSummary {
            name: name.to_string(),
            record_counts,
            file_count: blobs.len(),
        })
    }

    /// Lists snapshot manifests, newest first.
    pub async fn list_backups(&self) -> Result<Vec<BackupManifest>, AppError> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut manifests = Vec::new();
        let mut dir = fs::read_dir(&self.backup_dir).await?;

        while let Some(entry) = dir.next_entry().await? {
            let manifest_path = entry.path().join("manifest.json");
            match fs::read(&manifest_path).await {
                Ok(raw) => match serde_json::from_slice::<BackupManifest>(&raw) {
                    Ok(manifest) => manifests.push(manifest),
                    Err(e) => {
                        warn!(path = %manifest_path.display(), error = %e, "Unreadable manifest")
                    }
                },
                // Directories without a manifest are incomplete snapshots.
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            }
        }

        manifests.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(manifests)
    }

    /// Restores a snapshot by name.
    pub async fn restore_backup(&self, name: &str) -> Result<RecordCounts, AppError> {
        let snapshot_dir = self.backup_dir.join(name);
        if !snapshot_dir.join("manifest.json").exists() {
            return Err(AppError::not_found(format!("Backup '{name}' not found")));
        }

        info!(name = %name, "Starting restore");

        // Safety export of the current state before anything is replaced.
        let safety = self.create_backup().await?;
        info!(name = %safety.name, "Pre-restore backup created");

        let raw = fs::read(snapshot_dir.join("database.json")).await?;
        let database_backup: DatabaseBackup = serde_json::from_slice(&raw)?;

        self.backup_repo.restore(&database_backup.data).await?;

        // Blob copies back into the upload store.
        let files_dir = snapshot_dir.join("files");
        let mut restored_files = 0usize;
        if files_dir.exists() {
            let mut dir = fs::read_dir(&files_dir).await?;
            while let Some(entry) = dir.next_entry().await? {
                if entry.file_type().await?.is_dir() {
                    continue;
                }
                let blob_name = entry.file_name().to_string_lossy().to_string();
                let data = fs::read(entry.path()).await?;
                self.store.write_blob(&blob_name, data.into()).await?;
                restored_files += 1;
            }
        }

        let counts = database_backup.metadata.record_counts;
        info!(
            name = %name,
            resources = counts.resources,
            files = restored_files,
            "Restore completed"
        );

        Ok(counts)
    }
}
