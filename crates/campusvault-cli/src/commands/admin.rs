//! Admin account bootstrap and recovery.

use std::sync::Arc;

use clap::{Args, Subcommand};

use crate::output;
use campusvault_auth::password::PasswordHasher;
use campusvault_core::error::AppError;
use campusvault_database::repositories::user::UserRepository;
use campusvault_entity::subject::branch;
use campusvault_entity::user::CreateUser;

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Create an administrator account (or promote an existing user)
    Create {
        /// Username
        username: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Password
        #[arg(long)]
        password: String,
        /// Full name
        #[arg(long, default_value = "Administrator")]
        full_name: String,
    },
    /// Reset an administrator's password
    ResetPassword {
        /// Username
        username: String,
        /// New password
        #[arg(long)]
        password: String,
    },
}

/// Execute admin commands
pub async fn execute(args: &AdminArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::create_db_pool(&config).await?;
    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let hasher = PasswordHasher::new();

    match &args.command {
        AdminCommand::Create {
            username,
            email,
            password,
            full_name,
        } => {
            if let Some(existing) = user_repo.find_by_username(username).await? {
                user_repo.set_admin(existing.id, true).await?;
                output::print_success(&format!("User '{username}' promoted to administrator"));
                return Ok(());
            }

            let password_hash = hasher.hash(password)?;
            let user = user_repo
                .create(&CreateUser {
                    username: username.clone(),
                    email: email.clone(),
                    password_hash,
                    full_name: full_name.clone(),
                    year: 4,
                    branch: branch::DEFAULT_BRANCH.to_string(),
                    is_admin: true,
                })
                .await?;

            output::print_success(&format!("Administrator '{}' created ({})", user.username, user.id));
        }
        AdminCommand::ResetPassword { username, password } => {
            let user = user_repo
                .find_by_username(username)
                .await?
                .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))?;

            let password_hash = hasher.hash(password)?;
            user_repo.update_password(user.id, &password_hash).await?;

            output::print_success(&format!("Password reset for '{username}'"));
        }
    }

    Ok(())
}
