//! Storage provider trait.
//!
//! Abstracts the blob store so services depend on the trait rather than
//! on a concrete filesystem implementation.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A stream of file content chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Metadata about a stored object.
#[derive(Debug, Clone)]
pub struct StorageObjectMeta {
    /// Path relative to the provider root.
    pub path: String,
    /// Object size in bytes.
    pub size_bytes: u64,
    /// Whether the entry is a directory.
    pub is_directory: bool,
}

/// A blob storage backend.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Short identifier for the provider kind (e.g. "local").
    fn provider_type(&self) -> &str;

    /// Check that the backend is reachable and writable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Open an object as a chunked stream.
    async fn read(&self, path: &str) -> AppResult<ByteStream>;

    /// Read an entire object into memory.
    async fn read_bytes(&self, path: &str) -> AppResult<Bytes>;

    /// Write an object, creating parent directories as needed.
    async fn write(&self, path: &str, data: Bytes) -> AppResult<()>;

    /// Delete an object. Deleting a missing object is not an error.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Atomically rename an object within the provider.
    async fn rename(&self, from: &str, to: &str) -> AppResult<()>;

    /// Check whether an object exists.
    async fn exists(&self, path: &str) -> AppResult<bool>;

    /// List the immediate children of a directory.
    async fn list(&self, path: &str) -> AppResult<Vec<StorageObjectMeta>>;
}
