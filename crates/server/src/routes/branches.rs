use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::{require_admin, AuthClaims, CurrentUser, ServerState};
use crate::errors::JsonApiError;
use service::branch_service;
use service::center_service;
use service::pagination::Pagination;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub center_id: Option<Uuid>,
    pub region_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBranchInput {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub image: Option<String>,
    pub region_id: Uuid,
    pub center_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBranchInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub region_id: Option<Uuid>,
}

/// Branch mutations require control of the parent center.
async fn authorize_parent_center(
    state: &ServerState,
    claims: &AuthClaims,
    center_id: Uuid,
) -> Result<(), JsonApiError> {
    let parent = center_service::get_center(&state.db, center_id)
        .await?
        .ok_or_else(|| JsonApiError::not_found("center"))?;
    if parent.owner_id != claims.user_id {
        require_admin(claims)?;
    }
    Ok(())
}

pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<models::branch::Model>>, JsonApiError> {
    let branches = branch_service::list_branches(&state.db, q.center_id, q.region_id, page).await?;
    Ok(Json(branches))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::branch::Model>, JsonApiError> {
    match branch_service::get_branch(&state.db, id).await? {
        Some(found) => Ok(Json(found)),
        None => Err(JsonApiError::not_found("branch")),
    }
}

pub async fn create(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Json(input): Json<CreateBranchInput>,
) -> Result<Json<models::branch::Model>, JsonApiError> {
    authorize_parent_center(&state, &claims, input.center_id).await?;
    let created = branch_service::create_branch(
        &state.db,
        &input.name,
        &input.phone,
        &input.address,
        input.image.as_deref(),
        input.region_id,
        input.center_id,
    )
    .await?;
    info!(id = %created.id, center_id = %created.center_id, "branch_created");
    Ok(Json(created))
}

pub async fn update(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateBranchInput>,
) -> Result<Json<models::branch::Model>, JsonApiError> {
    let found = branch_service::get_branch(&state.db, id)
        .await?
        .ok_or_else(|| JsonApiError::not_found("branch"))?;
    authorize_parent_center(&state, &claims, found.center_id).await?;
    let updated = branch_service::update_branch(
        &state.db,
        id,
        models::branch::Patch {
            name: input.name.as_deref(),
            phone: input.phone.as_deref(),
            address: input.address.as_deref(),
            image: input.image.as_deref(),
            region_id: input.region_id,
        },
    )
    .await?;
    info!(id = %updated.id, "branch_updated");
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    let found = branch_service::get_branch(&state.db, id)
        .await?
        .ok_or_else(|| JsonApiError::not_found("branch"))?;
    authorize_parent_center(&state, &claims, found.center_id).await?;
    branch_service::delete_branch(&state.db, id).await?;
    info!(%id, "branch_deleted");
    Ok(StatusCode::NO_CONTENT)
}
