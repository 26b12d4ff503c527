use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::{require_admin, CurrentUser, ServerState};
use crate::errors::JsonApiError;
use service::pagination::Pagination;
use service::region_service;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRegionInput {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRegionInput {
    pub name: String,
}

#[utoipa::path(get, path = "/regions", tag = "catalog", responses((status = 200, description = "Regions")))]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<models::region::Model>>, JsonApiError> {
    let regions = region_service::list_regions(&state.db, q.search.as_deref(), page).await?;
    Ok(Json(regions))
}

#[utoipa::path(post, path = "/regions", tag = "catalog", responses((status = 200, description = "Created"), (status = 403, description = "Forbidden"), (status = 409, description = "Duplicate name")))]
pub async fn create(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Json(input): Json<CreateRegionInput>,
) -> Result<Json<models::region::Model>, JsonApiError> {
    require_admin(&claims)?;
    let created = region_service::create_region(&state.db, &input.name).await?;
    info!(id = %created.id, name = %created.name, "region_created");
    Ok(Json(created))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::region::Model>, JsonApiError> {
    match region_service::get_region(&state.db, id).await? {
        Some(found) => Ok(Json(found)),
        None => Err(JsonApiError::not_found("region")),
    }
}

pub async fn update(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateRegionInput>,
) -> Result<Json<models::region::Model>, JsonApiError> {
    require_admin(&claims)?;
    let updated = region_service::rename_region(&state.db, id, &input.name).await?;
    info!(id = %updated.id, "region_renamed");
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    require_admin(&claims)?;
    if region_service::delete_region(&state.db, id).await? {
        info!(%id, "region_deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(JsonApiError::not_found("region"))
    }
}
