//! Expired-session cleanup job handler.

use std::sync::Arc;

use serde_json::Value;
use tracing;

use campusvault_auth::session::store::SessionStore;

/// Sweeps expired and terminated sessions.
#[derive(Debug, Clone)]
pub struct SessionCleanupHandler {
    /// Session store.
    sessions: Arc<SessionStore>,
}

impl SessionCleanupHandler {
    /// Create a new session cleanup handler.
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self { sessions }
    }

    /// Delete dead session rows, returning a structured result for logging.
    pub async fn run(&self) -> Result<Value, String> {
        tracing::info!("Running session cleanup");

        let count = self
            .sessions
            .cleanup_expired()
            .await
            .map_err(|e| format!("Session cleanup failed: {e}"))?;

        tracing::info!("Cleaned up {} dead sessions", count);

        Ok(serde_json::json!({
            "task": "session_cleanup",
            "sessions_removed": count,
        }))
    }
}
