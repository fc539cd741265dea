//! Subject repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use campusvault_core::error::{AppError, ErrorKind};
use campusvault_core::result::AppResult;
use campusvault_entity::subject::{branch, CreateSubject, Subject, UpdateSubject};

/// Repository for subject CRUD and directory queries.
#[derive(Debug, Clone)]
pub struct SubjectRepository {
    pool: PgPool,
}

impl SubjectRepository {
    /// Create a new subject repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a subject by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Subject>> {
        sqlx::query_as::<_, Subject>("SELECT * FROM subjects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find subject by id", e)
            })
    }

    /// List subjects matching (year, semester, branch) exactly.
    pub async fn find_by_term(
        &self,
        year: i32,
        semester: i32,
        branch: &str,
    ) -> AppResult<Vec<Subject>> {
        sqlx::query_as::<_, Subject>(
            "SELECT * FROM subjects \
             WHERE year = $1 AND semester = $2 AND branch = $3 \
             ORDER BY code ASC",
        )
        .bind(year)
        .bind(semester)
        .bind(branch)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list subjects", e))
    }

    /// List every subject.
    pub async fn find_all(&self) -> AppResult<Vec<Subject>> {
        sqlx::query_as::<_, Subject>("SELECT * FROM subjects ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list all subjects", e)
            })
    }

    /// Find an existing subject by its five-column identity.
    ///
    /// Tries the exact branch first, then any legacy spelling of it, so
    /// rows created before branch canonicalization still match.
    pub async fn find_existing(
        &self,
        name: &str,
        code: &str,
        year: i32,
        semester: i32,
        branch_name: &str,
    ) -> AppResult<Option<Subject>> {
        let mut candidates = vec![branch_name.to_string()];
        candidates.extend(
            branch::legacy_names(branch_name)
                .into_iter()
                .map(String::from),
        );

        for candidate in &candidates {
            let found = sqlx::query_as::<_, Subject>(
                "SELECT * FROM subjects \
                 WHERE name = $1 AND code = $2 AND year = $3 AND semester = $4 AND branch = $5",
            )
            .bind(name)
            .bind(code)
            .bind(year)
            .bind(semester)
            .bind(candidate)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find existing subject", e)
            })?;

            if found.is_some() {
                return Ok(found);
            }
        }
        Ok(None)
    }

    /// Insert a new subject row.
    pub async fn create(&self, data: &CreateSubject) -> AppResult<Subject> {
        sqlx::query_as::<_, Subject>(
            "INSERT INTO subjects (name, code, year, semester, branch, icon) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.code)
        .bind(data.year)
        .bind(data.semester)
        .bind(&data.branch)
        .bind(&data.icon)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create subject", e))
    }

    /// Update a subject's name, code, or icon.
    pub async fn update(&self, id: Uuid, data: &UpdateSubject) -> AppResult<Subject> {
        sqlx::query_as::<_, Subject>(
            "UPDATE subjects SET name = COALESCE($2, name), \
                                 code = COALESCE($3, code), \
                                 icon = COALESCE($4, icon) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.code)
        .bind(&data.icon)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update subject", e))?
        .ok_or_else(|| AppError::not_found(format!("Subject {id} not found")))
    }

    /// Delete a subject by ID. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete subject", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// Rewrite one branch value to another. Returns the affected row count.
    pub async fn rename_branch(&self, from: &str, to: &str) -> AppResult<u64> {
        let result = sqlx::query("UPDATE subjects SET branch = $2 WHERE branch = $1")
            .bind(from)
            .bind(to)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to rename branch", e)
            })?;

        Ok(result.rows_affected())
    }
}
