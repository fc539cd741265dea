//! Resource upload service.
//!
//! Write protocol: temp file -> metadata insert -> promote to `<id><ext>`.
//! The blob only becomes reachable under its final name once the row
//! exists; a failed insert removes the temp file best-effort.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use campusvault_core::config::storage::StorageConfig;
use campusvault_core::error::AppError;
use campusvault_database::repositories::resource::ResourceRepository;
use campusvault_database::repositories::subject::SubjectRepository;
use campusvault_entity::resource::{CreateResource, Resource, ResourceKind};
use campusvault_storage::UploadStore;

use crate::context::RequestContext;

/// Parameters for a single-request upload.
#[derive(Debug, Clone)]
pub struct UploadParams {
    /// Display title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Resource category.
    pub resource_type: ResourceKind,
    /// Target subject.
    pub subject_id: Uuid,
    /// Original file name as uploaded.
    pub file_name: String,
    /// File content.
    pub data: Bytes,
}

/// Handles resource uploads.
#[derive(Clone)]
pub struct UploadService {
    /// Resource repository.
    resource_repo: Arc<ResourceRepository>,
    /// Subject repository, to verify the target subject.
    subject_repo: Arc<SubjectRepository>,
    /// Blob store.
    store: Arc<UploadStore>,
    /// Storage configuration.
    config: StorageConfig,
}

impl std::fmt::Debug for UploadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadService").finish()
    }
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        resource_repo: Arc<ResourceRepository>,
        subject_repo: Arc<SubjectRepository>,
        store: Arc<UploadStore>,
        config: StorageConfig,
    ) -> Self {
        Self {
            resource_repo,
            subject_repo,
            store,
            config,
        }
    }

    /// Performs a resource upload.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        params: UploadParams,
    ) -> Result<Resource, AppError> {
        if !ctx.is_admin {
            return Err(AppError::forbidden("Only administrators can upload resources"));
        }

        let extension = file_extension(&params.file_name).ok_or_else(|| {
            AppError::validation("File name has no extension")
        })?;

        if !self
            .config
            .allowed_extensions
            .iter()
            .any(|allowed| allowed == &extension)
        {
            return Err(AppError::validation(format!(
                "Invalid file type '{extension}'. Allowed: {}",
                self.config.allowed_extensions.join(", ")
            )));
        }

        if params.data.len() as u64 > self.config.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds maximum upload size of {} bytes",
                self.config.max_upload_size_bytes
            )));
        }

        // The target subject must exist before any bytes land on disk.
        self.subject_repo
            .find_by_id(params.subject_id)
            .await?
            .ok_or_else(|| AppError::not_found("Subject not found"))?;

        let file_size = params.data.len() as i64;
        let temp_path = self.store.write_temp(params.data).await?;

        let record = CreateResource {
            title: params.title,
            description: params.description,
            file_name: params.file_name,
            file_size,
            file_type: extension,
            resource_type: params.resource_type,
            subject_id: params.subject_id,
            uploaded_by: ctx.user_id,
        };

        let resource = match self.resource_repo.create(&record).await {
            Ok(resource) => resource,
            Err(e) => {
                if let Err(cleanup_err) = self.store.discard_temp(&temp_path).await {
                    warn!(error = %cleanup_err, "Failed to remove temp file after insert error");
                }
                return Err(e);
            }
        };

        self.store
            .promote(&temp_path, resource.id, &resource.file_type)
            .await?;

        info!(
            resource_id = %resource.id,
            subject_id = %resource.subject_id,
            file = %resource.file_name,
            size = resource.file_size,
            by = %ctx.username,
            "Resource uploaded"
        );

        Ok(resource)
    }
}

/// Lowercase extension of a file name, including the leading dot.
fn file_extension(file_name: &str) -> Option<String> {
    let dot = file_name.rfind('.')?;
    if dot == 0 || dot == file_name.len() - 1 {
        return None;
    }
    Some(file_name[dot..].to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("notes.PDF"), Some(".pdf".into()));
        assert_eq!(file_extension("archive.tar.gz"), Some(".gz".into()));
        assert_eq!(file_extension("noext"), None);
        assert_eq!(file_extension(".hidden"), None);
        assert_eq!(file_extension("trailing."), None);
    }
}
