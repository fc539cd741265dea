//! Subject directory handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use campusvault_core::error::AppError;
use campusvault_entity::subject::{branch, CreateSubject, Subject, UpdateSubject};

use crate::dto::request::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest};
use crate::dto::response::MessageResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;
use crate::ApiError;

/// Icon assigned when a request does not pick one.
const DEFAULT_ICON: &str = "fas fa-book";

/// GET /api/subjects/:year/:semester?branch=
pub async fn list_subjects(
    State(state): State<AppState>,
    Path((year, semester)): Path<(i32, i32)>,
    Query(query): Query<SubjectListQuery>,
) -> Result<Json<Vec<Subject>>, ApiError> {
    let subjects = state
        .subject_service
        .list(year, semester, query.branch.as_deref())
        .await?;
    Ok(Json(subjects))
}

/// GET /api/subject/:id
pub async fn get_subject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Subject>, ApiError> {
    let subject = state.subject_service.get(id).await?;
    Ok(Json(subject))
}

/// POST /api/subjects
pub async fn create_subject(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateSubjectRequest>,
) -> Result<(StatusCode, Json<Subject>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let subject = state
        .subject_service
        .create(
            &auth,
            CreateSubject {
                name: req.name,
                code: req.code,
                year: req.year,
                semester: req.semester,
                branch: req.branch.unwrap_or_else(|| branch::DEFAULT_BRANCH.to_string()),
                icon: req.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(subject)))
}

/// PUT /api/subjects/:id
pub async fn update_subject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateSubjectRequest>,
) -> Result<Json<Subject>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let subject = state
        .subject_service
        .update(
            &auth,
            id,
            UpdateSubject {
                name: req.name,
                code: req.code,
                icon: req.icon,
            },
        )
        .await?;

    Ok(Json(subject))
}

/// DELETE /api/subjects/:id
pub async fn delete_subject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.subject_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("Subject deleted")))
}
