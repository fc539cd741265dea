//! User management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use campusvault_auth::password::PasswordHasher;
use campusvault_core::error::AppError;
use campusvault_database::repositories::user::UserRepository;

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List all users
    List,
    /// Set a user's password
    SetPassword {
        /// Username
        username: String,
        /// New password
        #[arg(long)]
        password: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Username
    username: String,
    /// Email
    email: String,
    /// Study year
    year: i32,
    /// Branch
    branch: String,
    /// Admin flag
    admin: bool,
    /// Created at
    created_at: String,
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::create_db_pool(&config).await?;
    let user_repo = Arc::new(UserRepository::new(pool.clone()));

    match &args.command {
        UserCommand::List => {
            let users = user_repo.find_all().await?;

            let rows: Vec<UserRow> = users
                .iter()
                .map(|u| UserRow {
                    id: u.id.to_string(),
                    username: u.username.clone(),
                    email: u.email.clone(),
                    year: u.year,
                    branch: u.branch.clone(),
                    admin: u.is_admin,
                    created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();

            output::print_list(&rows, format);
        }
        UserCommand::SetPassword { username, password } => {
            let user = user_repo
                .find_by_username(username)
                .await?
                .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))?;

            let hasher = PasswordHasher::new();
            let password_hash = hasher.hash(password)?;
            user_repo.update_password(user.id, &password_hash).await?;

            output::print_success(&format!("Password updated for '{username}'"));
        }
    }

    Ok(())
}
