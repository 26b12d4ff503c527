use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::{require_admin, CurrentUser, ServerState};
use crate::errors::JsonApiError;
use service::pagination::Pagination;
use service::subject_service;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSubjectInput {
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSubjectInput {
    pub name: Option<String>,
    pub image: Option<String>,
}

pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<models::subject::Model>>, JsonApiError> {
    let subjects = subject_service::list_subjects(&state.db, q.search.as_deref(), page).await?;
    Ok(Json(subjects))
}

pub async fn create(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Json(input): Json<CreateSubjectInput>,
) -> Result<Json<models::subject::Model>, JsonApiError> {
    require_admin(&claims)?;
    let created = subject_service::create_subject(&state.db, &input.name, input.image.as_deref()).await?;
    info!(id = %created.id, name = %created.name, "subject_created");
    Ok(Json(created))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::subject::Model>, JsonApiError> {
    match subject_service::get_subject(&state.db, id).await? {
        Some(found) => Ok(Json(found)),
        None => Err(JsonApiError::not_found("subject")),
    }
}

pub async fn update(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateSubjectInput>,
) -> Result<Json<models::subject::Model>, JsonApiError> {
    require_admin(&claims)?;
    let updated =
        subject_service::update_subject(&state.db, id, input.name.as_deref(), input.image.as_deref()).await?;
    info!(id = %updated.id, "subject_updated");
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    require_admin(&claims)?;
    if subject_service::delete_subject(&state.db, id).await? {
        info!(%id, "subject_deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(JsonApiError::not_found("subject"))
    }
}
