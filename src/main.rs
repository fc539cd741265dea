//! CampusVault Server — college resource sharing platform
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing;
use tracing_subscriber::{fmt, EnvFilter};

use campusvault_core::config::AppConfig;
use campusvault_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("CAMPUSVAULT_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    AppConfig::load(&config_path)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting CampusVault v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Create data directories ──────────────────────────
    for dir in [&config.storage.upload_dir, &config.storage.backup_dir] {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create dir '{}': {}", dir, e)))?;
    }

    // ── Step 2: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db_pool = campusvault_database::connection::DatabasePool::connect(&config.database)
        .await?
        .into_pool();

    campusvault_database::migration::run_migrations(&db_pool).await?;

    // ── Step 3: Initialize storage ───────────────────────────────
    let provider =
        campusvault_storage::providers::LocalStorageProvider::new(&config.storage.upload_dir)
            .await?;
    let upload_store = Arc::new(campusvault_storage::UploadStore::new(Arc::new(provider)));
    tracing::info!(dir = %config.storage.upload_dir, "Upload store initialized");

    // ── Step 4: Initialize repositories ──────────────────────────
    let user_repo = Arc::new(campusvault_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));
    let subject_repo = Arc::new(
        campusvault_database::repositories::subject::SubjectRepository::new(db_pool.clone()),
    );
    let resource_repo = Arc::new(
        campusvault_database::repositories::resource::ResourceRepository::new(db_pool.clone()),
    );
    let download_repo = Arc::new(
        campusvault_database::repositories::download::DownloadRepository::new(db_pool.clone()),
    );
    let session_repo = Arc::new(
        campusvault_database::repositories::session::SessionRepository::new(db_pool.clone()),
    );
    let backup_repo = Arc::new(
        campusvault_database::repositories::backup::BackupRepository::new(db_pool.clone()),
    );

    // ── Step 5: Initialize auth system ───────────────────────────
    let password_hasher = Arc::new(campusvault_auth::password::PasswordHasher::new());
    let password_validator = campusvault_auth::password::PasswordValidator::new(&config.auth);
    let session_store = Arc::new(campusvault_auth::session::store::SessionStore::new(
        Arc::clone(&session_repo),
        config.session.clone(),
    ));
    let session_manager = Arc::new(campusvault_auth::session::manager::SessionManager::new(
        Arc::clone(&user_repo),
        Arc::clone(&session_store),
        Arc::clone(&password_hasher),
        password_validator,
    ));

    // ── Step 6: Initialize services ──────────────────────────────
    let subject_service = Arc::new(campusvault_service::subject::service::SubjectService::new(
        Arc::clone(&subject_repo),
        Arc::clone(&resource_repo),
    ));
    let resource_service = Arc::new(campusvault_service::resource::service::ResourceService::new(
        Arc::clone(&resource_repo),
        Arc::clone(&upload_store),
    ));
    let upload_service = Arc::new(campusvault_service::resource::upload::UploadService::new(
        Arc::clone(&resource_repo),
        Arc::clone(&subject_repo),
        Arc::clone(&upload_store),
        config.storage.clone(),
    ));
    let download_service = Arc::new(campusvault_service::resource::download::DownloadService::new(
        Arc::clone(&resource_repo),
        Arc::clone(&download_repo),
        Arc::clone(&upload_store),
    ));
    let user_service = Arc::new(campusvault_service::user::service::UserService::new(
        Arc::clone(&user_repo),
    ));
    let stats_service = Arc::new(campusvault_service::stats::service::StatsService::new(
        Arc::clone(&resource_repo),
        Arc::clone(&download_repo),
    ));
    let backup_service = Arc::new(campusvault_service::backup::service::BackupService::new(
        Arc::clone(&backup_repo),
        Arc::clone(&upload_store),
        &config.storage.backup_dir,
    ));

    tracing::info!("Services initialized");

    // ── Step 7: Start background worker ──────────────────────────
    let scheduler = if config.worker.enabled {
        let backup_handler = Arc::new(campusvault_worker::jobs::backup::BackupJobHandler::new(
            Arc::clone(&backup_service),
        ));
        let cleanup_handler = Arc::new(
            campusvault_worker::jobs::cleanup::SessionCleanupHandler::new(Arc::clone(
                &session_store,
            )),
        );

        let scheduler = campusvault_worker::scheduler::CronScheduler::new(
            config.worker.clone(),
            backup_handler,
            cleanup_handler,
        )
        .await?;
        scheduler.register_default_tasks().await?;
        scheduler.start().await?;

        tracing::info!("Background worker started");
        Some(scheduler)
    } else {
        tracing::info!("Background worker disabled");
        None
    };

    // ── Step 8: Build and start HTTP server ──────────────────────
    let app_state = campusvault_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        upload_store: Arc::clone(&upload_store),
        session_manager: Arc::clone(&session_manager),
        subject_service,
        resource_service,
        upload_service,
        download_service,
        user_service,
        stats_service,
    };

    let app = campusvault_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("CampusVault server listening on {}", addr);

    // ── Step 9: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 10: Stop background tasks ───────────────────────────
    if let Some(mut scheduler) = scheduler {
        let _ = scheduler.shutdown().await;
    }

    tracing::info!("CampusVault server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
