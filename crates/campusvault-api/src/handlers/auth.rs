//! Auth handlers — register, login, logout, current user.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use validator::Validate;

use campusvault_auth::session::manager::RegisterParams;
use campusvault_core::error::AppError;
use campusvault_entity::subject::branch;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{MessageResponse, SessionResponse, UserResponse};
use crate::extractors::auth::bearer_token;
use crate::extractors::AuthUser;
use crate::state::AppState;
use crate::ApiError;

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user_agent = user_agent(&headers);
    let result = state
        .session_manager
        .register(
            RegisterParams {
                username: req.username,
                email: req.email,
                password: req.password,
                full_name: req.full_name,
                year: req.year,
                branch: req.branch.unwrap_or_else(|| branch::DEFAULT_BRANCH.to_string()),
            },
            user_agent.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            token: result.token,
            user: UserResponse::from(result.user),
        }),
    ))
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user_agent = user_agent(&headers);
    let result = state
        .session_manager
        .login(&req.username, &req.password, user_agent.as_deref())
        .await?;

    Ok(Json(SessionResponse {
        token: result.token,
        user: UserResponse::from(result.user),
    }))
}

/// POST /api/logout
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, ApiError> {
    let token = bearer_token(&headers)?;
    state.session_manager.logout(token).await?;

    Ok(Json(MessageResponse::new("Logged out successfully")))
}

/// GET /api/user
pub async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.user_service.get_profile(&auth).await?;
    Ok(Json(UserResponse::from(user)))
}

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}
