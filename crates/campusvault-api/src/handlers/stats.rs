//! Stats handlers.

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use campusvault_service::stats::service::UserStats;

use crate::extractors::AuthUser;
use crate::state::AppState;
use crate::ApiError;

/// GET /api/stats/:userId
pub async fn user_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserStats>, ApiError> {
    let stats = state.stats_service.user_stats(&auth, user_id).await?;
    Ok(Json(stats))
}
