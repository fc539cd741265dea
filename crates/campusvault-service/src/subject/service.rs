//! Subject directory service — listing, idempotent create, update, delete.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use campusvault_core::error::AppError;
use campusvault_database::repositories::resource::ResourceRepository;
use campusvault_database::repositories::subject::SubjectRepository;
use campusvault_entity::subject::{branch, CreateSubject, Subject, UpdateSubject};

use crate::context::RequestContext;

/// Implements the subject directory operations.
#[derive(Debug, Clone)]
pub struct SubjectService {
    /// Subject repository.
    subject_repo: Arc<SubjectRepository>,
    /// Resource repository, for the delete dependency check.
    resource_repo: Arc<ResourceRepository>,
}

impl SubjectService {
    /// Creates a new subject service.
    pub fn new(subject_repo: Arc<SubjectRepository>, resource_repo: Arc<ResourceRepository>) -> Self {
        Self {
            subject_repo,
            resource_repo,
        }
    }

    /// Lists subjects for a (year, semester, branch) term.
    ///
    /// A missing branch falls back to the default branch.
    pub async fn list(
        &self,
        year: i32,
        semester: i32,
        branch_filter: Option<&str>,
    ) -> Result<Vec<Subject>, AppError> {
        let branch_name = branch_filter.unwrap_or(branch::DEFAULT_BRANCH);
        self.subject_repo
            .find_by_term(year, semester, branch_name)
            .await
    }

    /// Fetches one subject by id.
    pub async fn get(&self, id: Uuid) -> Result<Subject, AppError> {
        self.subject_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Subject not found"))
    }

    /// Creates a subject, returning the existing row when one already
    /// matches the five-column identity (including legacy branch
    /// spellings). This makes subject creation idempotent from the
    /// upload flow's perspective.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        mut data: CreateSubject,
    ) -> Result<Subject, AppError> {
        if !ctx.is_admin {
            return Err(AppError::forbidden("Only administrators can create subjects"));
        }

        if data.branch.trim().is_empty() {
            data.branch = branch::DEFAULT_BRANCH.to_string();
        }

        if let Some(existing) = self
            .subject_repo
            .find_existing(&data.name, &data.code, data.year, data.semester, &data.branch)
            .await?
        {
            return Ok(existing);
        }

        let subject = self.subject_repo.create(&data).await?;
        info!(
            subject_id = %subject.id,
            code = %subject.code,
            by = %ctx.username,
            "Subject created"
        );
        Ok(subject)
    }

    /// Updates a subject's name, code, or icon.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: UpdateSubject,
    ) -> Result<Subject, AppError> {
        if !ctx.is_admin {
            return Err(AppError::forbidden("Only administrators can update subjects"));
        }
        self.subject_repo.update(id, &data).await
    }

    /// Deletes a subject. Blocked while any resource references it.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        if !ctx.is_admin {
            return Err(AppError::forbidden("Only administrators can delete subjects"));
        }

        let subject = self.get(id).await?;

        let resource_count = self.resource_repo.count_by_subject(id).await?;
        if resource_count > 0 {
            return Err(AppError::conflict(format!(
                "Cannot delete subject '{}': {resource_count} resource(s) still reference it",
                subject.name
            )));
        }

        let deleted = self.subject_repo.delete(id).await?;
        if !deleted {
            return Err(AppError::not_found("Subject not found"));
        }

        info!(subject_id = %id, by = %ctx.username, "Subject deleted");
        Ok(())
    }
}
