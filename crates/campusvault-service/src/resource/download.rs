//! Resource download service — streams the blob and records the download.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use campusvault_core::error::AppError;
use campusvault_core::traits::storage::ByteStream;
use campusvault_database::repositories::download::DownloadRepository;
use campusvault_database::repositories::resource::ResourceRepository;
use campusvault_entity::download::CreateDownload;
use campusvault_entity::resource::Resource;
use campusvault_storage::store::mime_for_extension;
use campusvault_storage::UploadStore;

use crate::context::RequestContext;

/// Result containing resource metadata and a content stream for a download.
pub struct DownloadResult {
    /// Resource metadata.
    pub resource: Resource,
    /// File content stream.
    pub stream: ByteStream,
    /// MIME type for the Content-Type header.
    pub content_type: String,
    /// Original file name for Content-Disposition.
    pub filename: String,
}

impl std::fmt::Debug for DownloadResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadResult")
            .field("resource", &self.resource.id)
            .field("filename", &self.filename)
            .finish()
    }
}

/// Handles resource downloads.
#[derive(Clone)]
pub struct DownloadService {
    /// Resource repository.
    resource_repo: Arc<ResourceRepository>,
    /// Download log repository.
    download_repo: Arc<DownloadRepository>,
    /// Blob store.
    store: Arc<UploadStore>,
}

impl std::fmt::Debug for DownloadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadService").finish()
    }
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(
        resource_repo: Arc<ResourceRepository>,
        download_repo: Arc<DownloadRepository>,
        store: Arc<UploadStore>,
    ) -> Self {
        Self {
            resource_repo,
            download_repo,
            store,
        }
    }

    /// Downloads a resource.
    ///
    /// Every successful call appends exactly one download row and
    /// increments the resource counter by one — repeats are not
    /// deduplicated. Both side effects happen only after the blob has
    /// been opened, so a missing file never inflates the counter.
    pub async fn download(
        &self,
        ctx: &RequestContext,
        resource_id: Uuid,
    ) -> Result<DownloadResult, AppError> {
        let resource = self
            .resource_repo
            .find_by_id(resource_id)
            .await?
            .ok_or_else(|| AppError::not_found("Resource not found"))?;

        let stream = self.store.open(resource.id, &resource.file_type).await?;

        self.download_repo
            .create(&CreateDownload {
                user_id: ctx.user_id,
                resource_id: resource.id,
            })
            .await?;
        self.resource_repo
            .increment_download_count(resource.id)
            .await?;

        info!(
            resource_id = %resource.id,
            user_id = %ctx.user_id,
            "Download recorded"
        );

        Ok(DownloadResult {
            content_type: mime_for_extension(&resource.file_type).to_string(),
            filename: resource.file_name.clone(),
            resource,
            stream,
        })
    }
}
