//! Resource services — listing, upload, download, delete.

pub mod download;
pub mod service;
pub mod upload;

pub use download::DownloadService;
pub use service::ResourceService;
pub use upload::UploadService;
