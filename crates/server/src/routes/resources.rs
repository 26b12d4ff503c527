use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::{require_admin, CurrentUser, ServerState};
use crate::errors::JsonApiError;
use service::pagination::Pagination;
use service::resource_service;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub user_id: Option<Uuid>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateResourceInput {
    pub name: String,
    pub description: Option<String>,
    pub media: String,
    pub image: Option<String>,
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateResourceInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub media: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
}

pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<models::resource::Model>>, JsonApiError> {
    let resources =
        resource_service::list_resources(&state.db, q.category.as_deref(), q.user_id, q.search.as_deref(), page)
            .await?;
    Ok(Json(resources))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::resource::Model>, JsonApiError> {
    match resource_service::get_resource(&state.db, id).await? {
        Some(found) => Ok(Json(found)),
        None => Err(JsonApiError::not_found("resource")),
    }
}

pub async fn create(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Json(input): Json<CreateResourceInput>,
) -> Result<Json<models::resource::Model>, JsonApiError> {
    let created = resource_service::create_resource(
        &state.db,
        claims.user_id,
        &input.name,
        input.description.as_deref(),
        &input.media,
        input.image.as_deref(),
        &input.category,
    )
    .await?;
    info!(id = %created.id, user_id = %claims.user_id, category = %created.category, "resource_created");
    Ok(Json(created))
}

/// Uploader or admin may modify a resource.
pub async fn update(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateResourceInput>,
) -> Result<Json<models::resource::Model>, JsonApiError> {
    let found = resource_service::get_resource(&state.db, id)
        .await?
        .ok_or_else(|| JsonApiError::not_found("resource"))?;
    if found.user_id != claims.user_id {
        require_admin(&claims)?;
    }
    let updated = resource_service::update_resource(
        &state.db,
        id,
        models::resource::Patch {
            name: input.name.as_deref(),
            description: input.description.as_deref(),
            media: input.media.as_deref(),
            image: input.image.as_deref(),
            category: input.category.as_deref(),
        },
    )
    .await?;
    info!(id = %updated.id, "resource_updated");
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    let found = resource_service::get_resource(&state.db, id)
        .await?
        .ok_or_else(|| JsonApiError::not_found("resource"))?;
    if found.user_id != claims.user_id {
        require_admin(&claims)?;
    }
    resource_service::delete_resource(&state.db, id).await?;
    info!(%id, "resource_deleted");
    Ok(StatusCode::NO_CONTENT)
}
