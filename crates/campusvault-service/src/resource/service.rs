//! Resource listing and deletion.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use campusvault_core::error::AppError;
use campusvault_database::repositories::resource::ResourceRepository;
use campusvault_entity::resource::{Resource, ResourceKind};
use campusvault_storage::UploadStore;

use crate::context::RequestContext;

/// Resource queries and deletion.
#[derive(Clone)]
pub struct ResourceService {
    /// Resource repository.
    resource_repo: Arc<ResourceRepository>,
    /// Blob store, for deleting the backing file.
    store: Arc<UploadStore>,
}

impl std::fmt::Debug for ResourceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceService").finish()
    }
}

impl ResourceService {
    /// Creates a new resource service.
    pub fn new(resource_repo: Arc<ResourceRepository>, store: Arc<UploadStore>) -> Self {
        Self {
            resource_repo,
            store,
        }
    }

    /// Lists a subject's resources, optionally filtered by kind.
    pub async fn list_by_subject(
        &self,
        subject_id: Uuid,
        kind: Option<ResourceKind>,
    ) -> Result<Vec<Resource>, AppError> {
        self.resource_repo.find_by_subject(subject_id, kind).await
    }

    /// Lists resources uploaded by a user. Self or admin only.
    pub async fn list_by_uploader(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
    ) -> Result<Vec<Resource>, AppError> {
        if !ctx.can_act_for(user_id) {
            return Err(AppError::forbidden("Cannot view another user's uploads"));
        }
        self.resource_repo.find_by_uploader(user_id).await
    }

    /// Fetches one resource by id.
    pub async fn get(&self, id: Uuid) -> Result<Resource, AppError> {
        self.resource_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Resource not found"))
    }

    /// Deletes a resource and its blob. Owner or admin only.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let resource = self.get(id).await?;

        if !ctx.is_admin && resource.uploaded_by != ctx.user_id {
            return Err(AppError::forbidden(
                "Only the uploader or an administrator can delete this resource",
            ));
        }

        self.resource_repo.delete(id).await?;

        // Row is gone; a stale blob is only disk waste, so log and move on.
        if let Err(e) = self.store.remove(resource.id, &resource.file_type).await {
            warn!(resource_id = %id, error = %e, "Failed to delete resource blob");
        }

        info!(resource_id = %id, by = %ctx.username, "Resource deleted");
        Ok(())
    }
}
