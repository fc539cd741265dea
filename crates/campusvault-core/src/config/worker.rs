//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the background worker runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron expression for the nightly backup (six-field, seconds first).
    #[serde(default = "default_backup_schedule")]
    pub backup_schedule: String,
    /// Cron expression for the expired-session sweep.
    #[serde(default = "default_session_cleanup_schedule")]
    pub session_cleanup_schedule: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backup_schedule: default_backup_schedule(),
            session_cleanup_schedule: default_session_cleanup_schedule(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_backup_schedule() -> String {
    // Daily at 2 AM
    "0 0 2 * * *".to_string()
}

fn default_session_cleanup_schedule() -> String {
    // Every 15 minutes
    "0 */15 * * * *".to_string()
}
