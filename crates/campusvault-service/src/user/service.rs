//! User profile service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use campusvault_core::error::AppError;
use campusvault_database::repositories::user::UserRepository;
use campusvault_entity::user::{UpdateProfile, User};

use crate::context::RequestContext;

/// Profile reads and updates.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Fetches the current user's profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates a user's profile. Self or admin only.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        data: UpdateProfile,
    ) -> Result<User, AppError> {
        if !ctx.can_act_for(user_id) {
            return Err(AppError::forbidden("Cannot update another user's profile"));
        }

        if let Some(year) = data.year {
            if !(1..=4).contains(&year) {
                return Err(AppError::validation("Year must be between 1 and 4"));
            }
        }

        let user = self.user_repo.update_profile(user_id, &data).await?;
        info!(user_id = %user_id, by = %ctx.username, "Profile updated");
        Ok(user)
    }
}
