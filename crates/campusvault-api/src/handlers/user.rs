//! User profile handlers.

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use campusvault_core::error::AppError;
use campusvault_entity::user::UpdateProfile;

use crate::dto::request::{ChangePasswordRequest, UpdateProfileRequest};
use crate::dto::response::{MessageResponse, UserResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;
use crate::ApiError;

/// PUT /api/user/:userId
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .user_service
        .update_profile(
            &auth,
            user_id,
            UpdateProfile {
                full_name: req.full_name,
                year: req.year,
                branch: req.branch,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// PUT /api/user/:userId/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if auth.user_id != user_id {
        return Err(AppError::forbidden("Cannot change another user's password").into());
    }

    state
        .session_manager
        .change_password(user_id, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(MessageResponse::new("Password updated")))
}
