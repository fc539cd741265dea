//! Session persistence on top of the session repository.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use campusvault_core::config::session::SessionConfig;
use campusvault_core::error::AppError;
use campusvault_database::repositories::session::SessionRepository;
use campusvault_entity::session::{CreateSession, Session};

use super::token;

/// A freshly opened session together with the raw token handed to the client.
#[derive(Debug, Clone)]
pub struct OpenedSession {
    /// The persisted session row.
    pub session: Session,
    /// The raw bearer token. Never stored; shown to the client once.
    pub token: String,
}

/// Creates and resolves sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    repo: Arc<SessionRepository>,
    config: SessionConfig,
}

impl SessionStore {
    /// Creates a new session store.
    pub fn new(repo: Arc<SessionRepository>, config: SessionConfig) -> Self {
        Self { repo, config }
    }

    /// Open a session for a user and return the raw token.
    pub async fn open(
        &self,
        user_id: Uuid,
        user_agent: Option<&str>,
    ) -> Result<OpenedSession, AppError> {
        let raw_token = token::generate();
        let expires_at = Utc::now() + Duration::hours(self.config.ttl_hours as i64);

        let session = self
            .repo
            .create(&CreateSession {
                user_id,
                token_hash: token::hash(&raw_token),
                user_agent: user_agent.map(String::from),
                expires_at,
            })
            .await?;

        Ok(OpenedSession {
            session,
            token: raw_token,
        })
    }

    /// Resolve a raw bearer token to its active session, touching activity.
    pub async fn resolve(&self, raw_token: &str) -> Result<Session, AppError> {
        let session = self
            .repo
            .find_active_by_token_hash(&token::hash(raw_token))
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid or expired session"))?;

        self.repo.touch_activity(session.id).await?;
        Ok(session)
    }

    /// Terminate the session identified by a raw bearer token.
    pub async fn close(&self, raw_token: &str) -> Result<(), AppError> {
        let session = self
            .repo
            .find_active_by_token_hash(&token::hash(raw_token))
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid or expired session"))?;

        self.repo.terminate(session.id).await
    }

    /// Sweep expired and terminated sessions. Returns the removed count.
    pub async fn cleanup_expired(&self) -> Result<u64, AppError> {
        self.repo.cleanup_expired().await
    }
}
