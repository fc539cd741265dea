//! Resource blob store.
//!
//! Final blobs live at the top of the upload directory as `<id><ext>`.
//! Uploads are first written under `tmp/` and promoted with a rename once
//! the metadata row exists, so a half-written file can never be served.

use std::sync::Arc;

use bytes::Bytes;
use tracing::debug;
use uuid::Uuid;

use campusvault_core::result::AppResult;
use campusvault_core::traits::storage::{ByteStream, StorageObjectMeta, StorageProvider};

/// Directory (relative to the upload root) holding in-flight uploads.
const TEMP_DIR: &str = "tmp";

/// Store for resource blobs named `<id><ext>`.
#[derive(Clone)]
pub struct UploadStore {
    provider: Arc<dyn StorageProvider>,
}

impl std::fmt::Debug for UploadStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadStore").finish()
    }
}

impl UploadStore {
    /// Create a new upload store over the given provider.
    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        Self { provider }
    }

    /// Blob name for a resource id and extension.
    pub fn blob_name(resource_id: Uuid, extension: &str) -> String {
        format!("{resource_id}{extension}")
    }

    /// Write upload bytes to a fresh temp path and return it.
    pub async fn write_temp(&self, data: Bytes) -> AppResult<String> {
        let temp_path = format!("{TEMP_DIR}/{}", Uuid::new_v4());
        self.provider.write(&temp_path, data).await?;
        Ok(temp_path)
    }

    /// Promote a temp file to its final `<id><ext>` location.
    pub async fn promote(
        &self,
        temp_path: &str,
        resource_id: Uuid,
        extension: &str,
    ) -> AppResult<()> {
        let final_name = Self::blob_name(resource_id, extension);
        self.provider.rename(temp_path, &final_name).await?;
        debug!(resource_id = %resource_id, blob = %final_name, "Promoted upload");
        Ok(())
    }

    /// Remove a temp file. Missing files are ignored.
    pub async fn discard_temp(&self, temp_path: &str) -> AppResult<()> {
        self.provider.delete(temp_path).await
    }

    /// Open a resource blob as a stream.
    pub async fn open(&self, resource_id: Uuid, extension: &str) -> AppResult<ByteStream> {
        self.provider
            .read(&Self::blob_name(resource_id, extension))
            .await
    }

    /// Check whether a resource blob exists.
    pub async fn exists(&self, resource_id: Uuid, extension: &str) -> AppResult<bool> {
        self.provider
            .exists(&Self::blob_name(resource_id, extension))
            .await
    }

    /// Delete a resource blob.
    pub async fn remove(&self, resource_id: Uuid, extension: &str) -> AppResult<()> {
        self.provider
            .delete(&Self::blob_name(resource_id, extension))
            .await
    }

    /// List all finalized blobs (in-flight temp files are excluded).
    pub async fn list_blobs(&self) -> AppResult<Vec<StorageObjectMeta>> {
        let entries = self.provider.list("").await?;
        Ok(entries.into_iter().filter(|e| !e.is_directory).collect())
    }

    /// Read a finalized blob by its on-disk name.
    pub async fn read_blob(&self, blob_name: &str) -> AppResult<Bytes> {
        self.provider.read_bytes(blob_name).await
    }

    /// Write a finalized blob by its on-disk name (used by restore).
    pub async fn write_blob(&self, blob_name: &str, data: Bytes) -> AppResult<()> {
        self.provider.write(blob_name, data).await
    }
}

/// MIME type for an upload extension, for the download Content-Type header.
pub fn mime_for_extension(extension: &str) -> &'static str {
    match extension.trim_start_matches('.').to_lowercase().as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::LocalStorageProvider;

    async fn store() -> (tempfile::TempDir, UploadStore) {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalStorageProvider::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        (dir, UploadStore::new(Arc::new(provider)))
    }

    #[tokio::test]
    async fn test_temp_then_promote() {
        let (_dir, store) = store().await;
        let id = Uuid::new_v4();

        let temp = store.write_temp(Bytes::from("pdf bytes")).await.unwrap();
        assert!(!store.exists(id, ".pdf").await.unwrap());

        store.promote(&temp, id, ".pdf").await.unwrap();
        assert!(store.exists(id, ".pdf").await.unwrap());

        let blobs = store.list_blobs().await.unwrap();
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].path, format!("{id}.pdf"));
    }

    #[tokio::test]
    async fn test_discard_temp() {
        let (_dir, store) = store().await;

        let temp = store.write_temp(Bytes::from("abandoned")).await.unwrap();
        store.discard_temp(&temp).await.unwrap();

        assert!(store.list_blobs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_blob() {
        let (_dir, store) = store().await;
        let id = Uuid::new_v4();

        let temp = store.write_temp(Bytes::from("x")).await.unwrap();
        store.promote(&temp, id, ".doc").await.unwrap();
        store.remove(id, ".doc").await.unwrap();

        assert!(!store.exists(id, ".doc").await.unwrap());
    }

    #[test]
    fn test_mime_for_extension() {
        assert_eq!(mime_for_extension(".pdf"), "application/pdf");
        assert_eq!(mime_for_extension("PDF"), "application/pdf");
        assert_eq!(mime_for_extension(".bin"), "application/octet-stream");
    }
}
