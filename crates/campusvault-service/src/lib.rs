//! # campusvault-service
//!
//! Business logic service layer for CampusVault. Each service orchestrates
//! repositories, the upload store, and authentication to implement
//! application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod backup;
pub mod context;
pub mod resource;
pub mod stats;
pub mod subject;
pub mod user;

pub use backup::BackupService;
pub use context::RequestContext;
pub use resource::{DownloadService, ResourceService, UploadService};
pub use stats::StatsService;
pub use subject::{SubjectMaintenance, SubjectService};
pub use user::UserService;
