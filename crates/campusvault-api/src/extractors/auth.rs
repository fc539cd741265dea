//! `AuthUser` extractor — resolves the bearer token to a session and user.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use campusvault_core::error::AppError;
use campusvault_service::context::RequestContext;

use crate::state::AppState;
use crate::ApiError;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Pull the raw bearer token out of an Authorization header map.
pub fn bearer_token(headers: &axum::http::HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let (user, session_id) = state.session_manager.authenticate(token).await?;

        Ok(AuthUser(RequestContext::new(
            user.id,
            session_id,
            user.username,
            user.is_admin,
        )))
    }
}
