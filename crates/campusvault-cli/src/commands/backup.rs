//! Backup and restore CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use dialoguer::Confirm;

use crate::output;
use campusvault_core::error::AppError;
use campusvault_database::repositories::backup::BackupRepository;
use campusvault_service::backup::service::BackupService;
use campusvault_storage::providers::LocalStorageProvider;
use campusvault_storage::UploadStore;

/// Arguments for backup commands
#[derive(Debug, Args)]
pub struct BackupArgs {
    /// Backup subcommand
    #[command(subcommand)]
    pub command: BackupCommand,
}

/// Backup subcommands
#[derive(Debug, Subcommand)]
pub enum BackupCommand {
    /// Create a new snapshot
    Create,
    /// List available snapshots
    List,
    /// Restore a snapshot by name (destructive)
    Restore {
        /// Snapshot name, e.g. campusvault-backup-2026-08-06T02-00-00
        name: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Execute backup commands
pub async fn execute(args: &BackupArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::create_db_pool(&config).await?;

    let provider = LocalStorageProvider::new(&config.storage.upload_dir).await?;
    let store = Arc::new(UploadStore::new(Arc::new(provider)));
    let service = BackupService::new(
        Arc::new(BackupRepository::new(pool.clone())),
        store,
        &config.storage.backup_dir,
    );

    match &args.command {
        BackupCommand::Create => {
            let summary = service.create_backup().await?;
            output::print_success(&format!(
                "Backup '{}' created: {} user(s), {} subject(s), {} resource(s), {} file(s)",
                summary.name,
                summary.record_counts.users,
                summary.record_counts.subjects,
                summary.record_counts.resources,
                summary.file_count,
            ));
        }
        BackupCommand::List => {
            let manifests = service.list_backups().await?;
            if manifests.is_empty() {
                println!("No backups found");
            } else {
                for manifest in manifests {
                    println!(
                        "{}  created {}  ({} file(s))",
                        manifest.name,
                        manifest.created.format("%Y-%m-%d %H:%M:%S UTC"),
                        manifest.file_count,
                    );
                }
            }
        }
        BackupCommand::Restore { name, yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!(
                        "Restoring '{name}' will replace existing subjects, resources, and downloads. Continue?"
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;

                if !confirmed {
                    println!("Restore cancelled");
                    return Ok(());
                }
            }

            let counts = service.restore_backup(name).await?;
            output::print_success(&format!(
                "Restored '{}': {} subject(s), {} resource(s), {} download(s)",
                name, counts.subjects, counts.resources, counts.downloads,
            ));
        }
    }

    Ok(())
}
