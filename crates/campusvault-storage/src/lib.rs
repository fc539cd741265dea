//! # campusvault-storage
//!
//! Blob storage for CampusVault: the local filesystem provider and the
//! upload store that maps resource blobs to `<id><ext>` paths.

pub mod providers;
pub mod store;

pub use store::UploadStore;
