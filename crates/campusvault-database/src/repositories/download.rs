//! Download log repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use campusvault_core::error::{AppError, ErrorKind};
use campusvault_core::result::AppResult;
use campusvault_entity::download::{CreateDownload, Download};

/// Repository for the append-only download log.
#[derive(Debug, Clone)]
pub struct DownloadRepository {
    pool: PgPool,
}

impl DownloadRepository {
    /// Create a new download repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a download row.
    pub async fn create(&self, data: &CreateDownload) -> AppResult<Download> {
        sqlx::query_as::<_, Download>(
            "INSERT INTO downloads (user_id, resource_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.resource_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record download", e))
    }

    /// List a user's downloads, newest first.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Download>> {
        sqlx::query_as::<_, Download>(
            "SELECT * FROM downloads WHERE user_id = $1 ORDER BY downloaded_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list downloads", e))
    }

    /// Count downloads performed by a user.
    pub async fn count_by_user(&self, user_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM downloads WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count downloads", e)
            })
    }

    /// Count download rows for a resource.
    pub async fn count_by_resource(&self, resource_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM downloads WHERE resource_id = $1")
            .bind(resource_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count resource downloads", e)
            })
    }
}
