//! Backup snapshot formats.
//!
//! A snapshot is a directory containing `database.json` (metadata + a full
//! dump of the four tables), `files/` (copies of the upload blobs), and
//! `manifest.json` describing the snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campusvault_database::repositories::backup::DatabaseDump;

/// Format version written into new snapshots.
pub const BACKUP_FORMAT_VERSION: &str = "1.0";

/// Row counts captured at backup time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCounts {
    /// User rows.
    pub users: usize,
    /// Subject rows.
    pub subjects: usize,
    /// Resource rows.
    pub resources: usize,
    /// Download rows.
    pub downloads: usize,
}

impl RecordCounts {
    /// Counts taken from a dump.
    pub fn from_dump(dump: &DatabaseDump) -> Self {
        let (users, subjects, resources, downloads) = dump.counts();
        Self {
            users,
            subjects,
            resources,
            downloads,
        }
    }
}

/// Metadata stored alongside the table dump in `database.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupMetadata {
    /// When the backup was taken.
    pub backup_date: DateTime<Utc>,
    /// Snapshot format version.
    pub version: String,
    /// Row counts at backup time.
    pub record_counts: RecordCounts,
}

/// The full content of `database.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseBackup {
    /// Snapshot metadata.
    pub metadata: BackupMetadata,
    /// The table dump.
    pub data: DatabaseDump,
}

/// The content of `manifest.json` at the snapshot root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupManifest {
    /// Snapshot directory name.
    pub name: String,
    /// When the snapshot was created.
    pub created: DateTime<Utc>,
    /// Snapshot format version.
    pub version: String,
    /// Number of blob files captured.
    pub file_count: usize,
}

/// Build a snapshot name from its creation time,
/// e.g. `campusvault-backup-2026-08-06T02-00-00`.
pub fn backup_name(at: DateTime<Utc>) -> String {
    format!("campusvault-backup-{}", at.format("%Y-%m-%dT%H-%M-%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_backup_name_format() {
        let at = Utc.with_ymd_and_hms(2026, 8, 6, 2, 0, 0).unwrap();
        assert_eq!(backup_name(at), "campusvault-backup-2026-08-06T02-00-00");
    }

    #[test]
    fn test_manifest_round_trip() {
        let manifest = BackupManifest {
            name: "campusvault-backup-2026-08-06T02-00-00".into(),
            created: Utc::now(),
            version: BACKUP_FORMAT_VERSION.into(),
            file_count: 3,
        };

        let json = serde_json::to_string(&manifest).unwrap();
        let parsed: BackupManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, manifest.name);
        assert_eq!(parsed.file_count, 3);
    }
}
