//! Download log entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row per download action. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Download {
    /// Unique download identifier.
    pub id: Uuid,
    /// The user who downloaded.
    pub user_id: Uuid,
    /// The resource that was downloaded.
    pub resource_id: Uuid,
    /// When the download happened.
    pub downloaded_at: DateTime<Utc>,
}

/// Data required to record a download.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDownload {
    /// The downloading user.
    pub user_id: Uuid,
    /// The downloaded resource.
    pub resource_id: Uuid,
}
