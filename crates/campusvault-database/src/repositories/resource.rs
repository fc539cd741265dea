//! Resource repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use campusvault_core::error::{AppError, ErrorKind};
use campusvault_core::result::AppResult;
use campusvault_entity::resource::{CreateResource, Resource, ResourceKind};

/// Repository for resource metadata rows.
#[derive(Debug, Clone)]
pub struct ResourceRepository {
    pool: PgPool,
}

impl ResourceRepository {
    /// Create a new resource repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a resource by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Resource>> {
        sqlx::query_as::<_, Resource>("SELECT * FROM resources WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find resource by id", e)
            })
    }

    /// List resources for a subject, optionally filtered by kind, newest first.
    pub async fn find_by_subject(
        &self,
        subject_id: Uuid,
        kind: Option<ResourceKind>,
    ) -> AppResult<Vec<Resource>> {
        match kind {
            Some(kind) => sqlx::query_as::<_, Resource>(
                "SELECT * FROM resources \
                 WHERE subject_id = $1 AND resource_type = $2 \
                 ORDER BY created_at DESC",
            )
            .bind(subject_id)
            .bind(kind)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list resources by kind", e)
            }),
            None => sqlx::query_as::<_, Resource>(
                "SELECT * FROM resources WHERE subject_id = $1 ORDER BY created_at DESC",
            )
            .bind(subject_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list resources", e)
            }),
        }
    }

    /// List resources uploaded by a user, newest first.
    pub async fn find_by_uploader(&self, user_id: Uuid) -> AppResult<Vec<Resource>> {
        sqlx::query_as::<_, Resource>(
            "SELECT * FROM resources WHERE uploaded_by = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list user resources", e)
        })
    }

    /// Insert a new resource row.
    pub async fn create(&self, data: &CreateResource) -> AppResult<Resource> {
        sqlx::query_as::<_, Resource>(
            "INSERT INTO resources \
             (title, description, file_name, file_size, file_type, resource_type, subject_id, uploaded_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.file_name)
        .bind(data.file_size)
        .bind(&data.file_type)
        .bind(data.resource_type)
        .bind(data.subject_id)
        .bind(data.uploaded_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create resource", e))
    }

    /// Increment the download counter by one.
    pub async fn increment_download_count(&self, id: Uuid) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE resources SET download_count = download_count + 1 WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        "Failed to increment download count",
                        e,
                    )
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Resource {id} not found")));
        }
        Ok(())
    }

    /// Re-point resources from one subject to another. Returns the moved count.
    pub async fn reassign_subject(&self, from: Uuid, to: Uuid) -> AppResult<u64> {
        let result = sqlx::query("UPDATE resources SET subject_id = $2 WHERE subject_id = $1")
            .bind(from)
            .bind(to)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to reassign resources", e)
            })?;

        Ok(result.rows_affected())
    }

    /// Delete a resource row. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete resource", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// Count resources belonging to a subject.
    pub async fn count_by_subject(&self, subject_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM resources WHERE subject_id = $1")
            .bind(subject_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count subject resources", e)
            })
    }

    /// Count resources uploaded by a user.
    pub async fn count_by_uploader(&self, user_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM resources WHERE uploaded_by = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count uploads", e)
            })
    }

    /// Sum of download counters over a user's uploads.
    pub async fn total_downloads_of_uploader(&self, user_id: Uuid) -> AppResult<i64> {
        let total: Option<i64> = sqlx::query_scalar(
            "SELECT SUM(download_count)::BIGINT FROM resources WHERE uploaded_by = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to sum download counts", e)
        })?;

        Ok(total.unwrap_or(0))
    }
}
