//! Session lifecycle manager — register, login, logout, and request auth.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use campusvault_core::error::AppError;
use campusvault_database::repositories::user::UserRepository;
use campusvault_entity::user::{CreateUser, User};

use crate::password::{PasswordHasher, PasswordValidator};

use super::store::{OpenedSession, SessionStore};

/// Result of a successful registration or login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The raw bearer token for the client.
    pub token: String,
    /// The session ID backing the token.
    pub session_id: Uuid,
    /// The authenticated user.
    pub user: User,
}

/// Input for registering a new account.
#[derive(Debug, Clone)]
pub struct RegisterParams {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Full name.
    pub full_name: String,
    /// Study year (1-4).
    pub year: i32,
    /// Academic branch.
    pub branch: String,
}

/// Manages the complete session lifecycle.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Session persistence.
    session_store: Arc<SessionStore>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
    /// Password policy.
    password_validator: PasswordValidator,
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        user_repo: Arc<UserRepository>,
        session_store: Arc<SessionStore>,
        password_hasher: Arc<PasswordHasher>,
        password_validator: PasswordValidator,
    ) -> Self {
        Self {
            user_repo,
            session_store,
            password_hasher,
            password_validator,
        }
    }

    /// Registers a new account and opens a session for it.
    ///
    /// Duplicate usernames and emails fail with a conflict error; the
    /// repository's unique constraints back the explicit pre-checks, so
    /// concurrent registrations cannot slip through.
    pub async fn register(
        &self,
        params: RegisterParams,
        user_agent: Option<&str>,
    ) -> Result<LoginResult, AppError> {
        self.password_validator.validate(&params.password)?;

        if self
            .user_repo
            .find_by_username(&params.username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "Username '{}' already exists",
                params.username
            )));
        }

        if self.user_repo.find_by_email(&params.email).await?.is_some() {
            return Err(AppError::conflict("Email already in use"));
        }

        let password_hash = self.password_hasher.hash(&params.password)?;

        let user = self
            .user_repo
            .create(&CreateUser {
                username: params.username,
                email: params.email,
                password_hash,
                full_name: params.full_name,
                year: params.year,
                branch: params.branch,
                is_admin: false,
            })
            .await?;

        let opened = self.session_store.open(user.id, user_agent).await?;

        info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(LoginResult {
            token: opened.token,
            session_id: opened.session.id,
            user,
        })
    }

    /// Performs the login flow: find user, verify password, open session.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        user_agent: Option<&str>,
    ) -> Result<LoginResult, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

        let password_valid = self.password_hasher.verify(password, &user.password_hash)?;
        if !password_valid {
            return Err(AppError::unauthorized("Invalid username or password"));
        }

        let opened: OpenedSession = self.session_store.open(user.id, user_agent).await?;

        info!(
            user_id = %user.id,
            session_id = %opened.session.id,
            "Login successful"
        );

        Ok(LoginResult {
            token: opened.token,
            session_id: opened.session.id,
            user,
        })
    }

    /// Terminates the session behind a raw bearer token.
    pub async fn logout(&self, raw_token: &str) -> Result<(), AppError> {
        self.session_store.close(raw_token).await?;
        info!("Logout completed");
        Ok(())
    }

    /// Resolves a raw bearer token to its user and session.
    ///
    /// Called by the request extractor on every authenticated request.
    pub async fn authenticate(&self, raw_token: &str) -> Result<(User, Uuid), AppError> {
        let session = self.session_store.resolve(raw_token).await?;

        let user = self
            .user_repo
            .find_by_id(session.user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Session user no longer exists"))?;

        Ok((user, session.id))
    }

    /// Changes a user's password after verifying the current one.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;

        let current_valid = self
            .password_hasher
            .verify(current_password, &user.password_hash)?;
        if !current_valid {
            return Err(AppError::unauthorized("Current password is incorrect"));
        }

        self.password_validator
            .validate_not_same(current_password, new_password)?;
        self.password_validator.validate(new_password)?;

        let new_hash = self.password_hasher.hash(new_password)?;
        self.user_repo.update_password(user_id, &new_hash).await?;

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }
}
