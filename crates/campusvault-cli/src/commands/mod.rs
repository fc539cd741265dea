//! CLI command definitions and dispatch.

pub mod admin;
pub mod backup;
pub mod migrate;
pub mod seed;
pub mod subject;
pub mod user;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use campusvault_core::error::AppError;

/// CampusVault — college resource sharing platform
#[derive(Debug, Parser)]
#[command(name = "campusvault", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Admin account bootstrap and recovery
    Admin(admin::AdminArgs),
    /// User management
    User(user::UserArgs),
    /// Subject maintenance (branch fixes, duplicate merge)
    Subject(subject::SubjectArgs),
    /// Backup and restore
    Backup(backup::BackupArgs),
    /// Seed the standard subject catalog
    Seed(seed::SeedArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Admin(args) => admin::execute(args, &self.config).await,
            Commands::User(args) => user::execute(args, &self.config, self.format).await,
            Commands::Subject(args) => subject::execute(args, &self.config).await,
            Commands::Backup(args) => backup::execute(args, &self.config).await,
            Commands::Seed(args) => seed::execute(args, &self.config).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<campusvault_core::config::AppConfig, AppError> {
    campusvault_core::config::AppConfig::load(config_path)
}

/// Helper: create database pool from config
pub async fn create_db_pool(
    config: &campusvault_core::config::AppConfig,
) -> Result<sqlx::PgPool, AppError> {
    let pool = campusvault_database::connection::DatabasePool::connect(&config.database).await?;
    Ok(pool.into_pool())
}
