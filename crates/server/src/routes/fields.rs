use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::{require_admin, CurrentUser, ServerState};
use crate::errors::JsonApiError;
use service::field_service;
use service::pagination::Pagination;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateFieldInput {
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFieldInput {
    pub name: Option<String>,
    pub image: Option<String>,
}

pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<models::field::Model>>, JsonApiError> {
    let fields = field_service::list_fields(&state.db, q.search.as_deref(), page).await?;
    Ok(Json(fields))
}

pub async fn create(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Json(input): Json<CreateFieldInput>,
) -> Result<Json<models::field::Model>, JsonApiError> {
    require_admin(&claims)?;
    let created = field_service::create_field(&state.db, &input.name, input.image.as_deref()).await?;
    info!(id = %created.id, name = %created.name, "field_created");
    Ok(Json(created))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::field::Model>, JsonApiError> {
    match field_service::get_field(&state.db, id).await? {
        Some(found) => Ok(Json(found)),
        None => Err(JsonApiError::not_found("field")),
    }
}

pub async fn update(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateFieldInput>,
) -> Result<Json<models::field::Model>, JsonApiError> {
    require_admin(&claims)?;
    let updated = field_service::update_field(&state.db, id, input.name.as_deref(), input.image.as_deref()).await?;
    info!(id = %updated.id, "field_updated");
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    require_admin(&claims)?;
    if field_service::delete_field(&state.db, id).await? {
        info!(%id, "field_deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(JsonApiError::not_found("field"))
    }
}
