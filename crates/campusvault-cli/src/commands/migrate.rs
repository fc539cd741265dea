//! Database migration CLI commands.

use clap::{Args, Subcommand};

use crate::output;
use campusvault_core::error::AppError;

/// Arguments for migration commands
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Apply all pending migrations
    Run,
    /// Show applied migration versions
    Status,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::create_db_pool(&config).await?;

    match &args.command {
        MigrateCommand::Run => {
            campusvault_database::migration::run_migrations(&pool).await?;
            output::print_success("Migrations applied");
        }
        MigrateCommand::Status => {
            let versions = campusvault_database::migration::applied_versions(&pool).await?;
            if versions.is_empty() {
                println!("No migrations applied");
            } else {
                for (version, description) in versions {
                    println!("{version}  {description}");
                }
            }
        }
    }

    Ok(())
}
