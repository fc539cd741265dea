//! Resource handlers — listing, multipart upload, download, delete.

use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use bytes::Bytes;
use uuid::Uuid;

use campusvault_core::error::AppError;
use campusvault_entity::resource::{Resource, ResourceKind};
use campusvault_service::resource::upload::UploadParams;

use crate::dto::request::ResourceListQuery;
use crate::dto::response::MessageResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;
use crate::ApiError;

/// GET /api/resources/:subjectId?type=
pub async fn list_resources(
    State(state): State<AppState>,
    Path(subject_id): Path<Uuid>,
    Query(query): Query<ResourceListQuery>,
) -> Result<Json<Vec<Resource>>, ApiError> {
    let kind = query
        .resource_type
        .as_deref()
        .map(str::parse::<ResourceKind>)
        .transpose()?;

    let resources = state
        .resource_service
        .list_by_subject(subject_id, kind)
        .await?;
    Ok(Json(resources))
}

/// GET /api/resources/user/:userId
pub async fn list_user_resources(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Resource>>, ApiError> {
    let resources = state.resource_service.list_by_uploader(&auth, user_id).await?;
    Ok(Json(resources))
}

/// POST /api/resources — multipart upload with a `file` field.
pub async fn upload_resource(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Resource>), ApiError> {
    let params = parse_upload(multipart).await?;
    let resource = state.upload_service.upload(&auth, params).await?;
    Ok((StatusCode::CREATED, Json(resource)))
}

/// GET /api/download/:resourceId
pub async fn download_resource(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(resource_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let result = state.download_service.download(&auth, resource_id).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", result.filename),
        )
        .header(header::CONTENT_LENGTH, result.resource.file_size)
        .body(Body::from_stream(result.stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// DELETE /api/resources/:id
pub async fn delete_resource(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.resource_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("Resource deleted")))
}

/// Collect the multipart fields of an upload request.
async fn parse_upload(mut multipart: Multipart) -> Result<UploadParams, AppError> {
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut resource_type: Option<ResourceKind> = None;
    let mut subject_id: Option<Uuid> = None;
    let mut file_name: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => title = Some(read_text(field).await?),
            "description" => {
                let text = read_text(field).await?;
                if !text.is_empty() {
                    description = Some(text);
                }
            }
            "resource_type" => resource_type = Some(read_text(field).await?.parse()?),
            "subject_id" => {
                let text = read_text(field).await?;
                subject_id = Some(
                    Uuid::parse_str(&text).map_err(|_| AppError::validation("Invalid subject_id"))?,
                );
            }
            "file" => {
                file_name = field.file_name().map(String::from);
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            _ => {}
        }
    }

    Ok(UploadParams {
        title: title.ok_or_else(|| AppError::validation("title is required"))?,
        description,
        resource_type: resource_type
            .ok_or_else(|| AppError::validation("resource_type is required"))?,
        subject_id: subject_id.ok_or_else(|| AppError::validation("subject_id is required"))?,
        file_name: file_name.ok_or_else(|| AppError::validation("No file uploaded"))?,
        data: data.ok_or_else(|| AppError::validation("No file uploaded"))?,
    })
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Read error: {e}")))
}
