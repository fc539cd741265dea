//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use campusvault_auth::session::manager::SessionManager;
use campusvault_core::config::AppConfig;
use campusvault_storage::UploadStore;

use campusvault_service::resource::download::DownloadService;
use campusvault_service::resource::service::ResourceService;
use campusvault_service::resource::upload::UploadService;
use campusvault_service::stats::service::StatsService;
use campusvault_service::subject::service::SubjectService;
use campusvault_service::user::service::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Blob store.
    pub upload_store: Arc<UploadStore>,

    /// Session lifecycle manager.
    pub session_manager: Arc<SessionManager>,

    /// Subject directory service.
    pub subject_service: Arc<SubjectService>,
    /// Resource queries and deletion.
    pub resource_service: Arc<ResourceService>,
    /// Upload service.
    pub upload_service: Arc<UploadService>,
    /// Download service.
    pub download_service: Arc<DownloadService>,
    /// User profile service.
    pub user_service: Arc<UserService>,
    /// Stats service.
    pub stats_service: Arc<StatsService>,
}
