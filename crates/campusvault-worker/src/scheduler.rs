//! Cron scheduler for periodic maintenance tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use campusvault_core::config::worker::WorkerConfig;
use campusvault_core::error::AppError;

use crate::jobs::{BackupJobHandler, SessionCleanupHandler};

/// Cron-based scheduler for periodic background tasks.
///
/// Handlers are invoked directly at their scheduled times; there is no
/// job queue, as the only background work is fixed maintenance.
pub struct CronScheduler {
    /// The underlying job scheduler.
    scheduler: JobScheduler,
    /// Worker configuration (cron expressions).
    config: WorkerConfig,
    /// Backup job handler.
    backup_handler: Arc<BackupJobHandler>,
    /// Session cleanup handler.
    cleanup_handler: Arc<SessionCleanupHandler>,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler.
    pub async fn new(
        config: WorkerConfig,
        backup_handler: Arc<BackupJobHandler>,
        cleanup_handler: Arc<SessionCleanupHandler>,
    ) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            scheduler,
            config,
            backup_handler,
            cleanup_handler,
        })
    }

    /// Register all default scheduled tasks.
    pub async fn register_default_tasks(&self) -> Result<(), AppError> {
        self.register_backup().await?;
        self.register_session_cleanup().await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler.
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Nightly backup.
    async fn register_backup(&self) -> Result<(), AppError> {
        let handler = Arc::clone(&self.backup_handler);
        let job = CronJob::new_async(self.config.backup_schedule.as_str(), move |_uuid, _lock| {
            let handler = Arc::clone(&handler);
            Box::pin(async move {
                if let Err(e) = handler.run().await {
                    tracing::error!("Backup job failed: {}", e);
                }
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create backup schedule: {}", e)))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add backup schedule: {}", e)))?;

        tracing::info!(schedule = %self.config.backup_schedule, "Registered: backup");
        Ok(())
    }

    /// Expired-session sweep.
    async fn register_session_cleanup(&self) -> Result<(), AppError> {
        let handler = Arc::clone(&self.cleanup_handler);
        let job = CronJob::new_async(
            self.config.session_cleanup_schedule.as_str(),
            move |_uuid, _lock| {
                let handler = Arc::clone(&handler);
                Box::pin(async move {
                    if let Err(e) = handler.run().await {
                        tracing::error!("Session cleanup job failed: {}", e);
                    }
                })
            },
        )
        .map_err(|e| {
            AppError::internal(format!("Failed to create session_cleanup schedule: {}", e))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add session_cleanup schedule: {}", e))
        })?;

        tracing::info!(
            schedule = %self.config.session_cleanup_schedule,
            "Registered: session_cleanup"
        );
        Ok(())
    }
}
