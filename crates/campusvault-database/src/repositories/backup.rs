//! Whole-table export and transactional restore for backups.
//!
//! Exports every table as entity rows and restores a dump atomically.
//! Users are never cleared on restore so admin accounts survive a bad
//! snapshot (same rule as the original operational tooling).

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use campusvault_core::error::{AppError, ErrorKind};
use campusvault_core::result::AppResult;
use campusvault_entity::download::Download;
use campusvault_entity::resource::Resource;
use campusvault_entity::subject::Subject;

/// A user row as stored in a dump.
///
/// Separate from the API entity: the dump must round-trip the password
/// hash, which the entity deliberately never serializes.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DumpedUser {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Argon2id password hash.
    pub password_hash: String,
    /// Full name.
    pub full_name: String,
    /// Study year.
    pub year: i32,
    /// Academic branch.
    pub branch: String,
    /// Administrator flag.
    pub is_admin: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A full dump of the four persistent tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseDump {
    /// All user rows.
    pub users: Vec<DumpedUser>,
    /// All subject rows.
    pub subjects: Vec<Subject>,
    /// All resource rows.
    pub resources: Vec<Resource>,
    /// All download rows.
    pub downloads: Vec<Download>,
}

impl DatabaseDump {
    /// Row counts per table, in (users, subjects, resources, downloads) order.
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        (
            self.users.len(),
            self.subjects.len(),
            self.resources.len(),
            self.downloads.len(),
        )
    }
}

/// Repository performing whole-database export and restore.
#[derive(Debug, Clone)]
pub struct BackupRepository {
    pool: PgPool,
}

impl BackupRepository {
    /// Create a new backup repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Export every table.
    pub async fn export_all(&self) -> AppResult<DatabaseDump> {
        let users = sqlx::query_as::<_, DumpedUser>("SELECT * FROM users ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to export users", e))?;

        let subjects =
            sqlx::query_as::<_, Subject>("SELECT * FROM subjects ORDER BY created_at ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to export subjects", e)
                })?;

        let resources =
            sqlx::query_as::<_, Resource>("SELECT * FROM resources ORDER BY created_at ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to export resources", e)
                })?;

        let downloads =
            sqlx::query_as::<_, Download>("SELECT * FROM downloads ORDER BY downloaded_at ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to export downloads", e)
                })?;

        Ok(DatabaseDump {
            users,
            subjects,
            resources,
            downloads,
        })
    }

    /// Restore a dump atomically.
    ///
    /// Clears downloads, resources, and subjects, then upserts every row
    /// from the dump. User rows are upserted without clearing the table.
    pub async fn restore(&self, dump: &DatabaseDump) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin restore transaction", e)
        })?;

        // Children first, respecting foreign keys.
        for table in ["downloads", "resources", "subjects"] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        format!("Failed to clear {table}"),
                        e,
                    )
                })?;
        }

        for user in &dump.users {
            sqlx::query(
                "INSERT INTO users \
                 (id, username, email, password_hash, full_name, year, branch, is_admin, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
                 ON CONFLICT (id) DO UPDATE SET \
                     username = EXCLUDED.username, \
                     email = EXCLUDED.email, \
                     password_hash = EXCLUDED.password_hash, \
                     full_name = EXCLUDED.full_name, \
                     year = EXCLUDED.year, \
                     branch = EXCLUDED.branch, \
                     is_admin = EXCLUDED.is_admin, \
                     updated_at = EXCLUDED.updated_at",
            )
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.full_name)
            .bind(user.year)
            .bind(&user.branch)
            .bind(user.is_admin)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to restore user row", e)
            })?;
        }

        for subject in &dump.subjects {
            sqlx::query(
                "INSERT INTO subjects (id, name, code, year, semester, branch, icon, created_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(subject.id)
            .bind(&subject.name)
            .bind(&subject.code)
            .bind(subject.year)
            .bind(subject.semester)
            .bind(&subject.branch)
            .bind(&subject.icon)
            .bind(subject.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to restore subject row", e)
            })?;
        }

        for resource in &dump.resources {
            sqlx::query(
                "INSERT INTO resources \
                 (id, title, description, file_name, file_size, file_type, resource_type, \
                  subject_id, uploaded_by, download_count, is_approved, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
            )
            .bind(resource.id)
            .bind(&resource.title)
            .bind(&resource.description)
            .bind(&resource.file_name)
            .bind(resource.file_size)
            .bind(&resource.file_type)
            .bind(resource.resource_type)
            .bind(resource.subject_id)
            .bind(resource.uploaded_by)
            .bind(resource.download_count)
            .bind(resource.is_approved)
            .bind(resource.created_at)
            .bind(resource.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to restore resource row", e)
            })?;
        }

        for download in &dump.downloads {
            sqlx::query(
                "INSERT INTO downloads (id, user_id, resource_id, downloaded_at) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(download.id)
            .bind(download.user_id)
            .bind(download.resource_id)
            .bind(download.downloaded_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to restore download row", e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit restore", e)
        })?;

        Ok(())
    }
}
