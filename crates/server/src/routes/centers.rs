use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::{require_admin, require_role, AuthClaims, CurrentUser, ServerState};
use crate::errors::JsonApiError;
use models::user::Role;
use service::center_service::{self, CenterStats};
use service::pagination::Pagination;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub region_id: Option<Uuid>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCenterInput {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub image: Option<String>,
    pub region_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCenterInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub region_id: Option<Uuid>,
}

/// Owner or admin may manage a center.
async fn authorize_center_manager(
    state: &ServerState,
    claims: &AuthClaims,
    id: Uuid,
) -> Result<models::center::Model, JsonApiError> {
    let found = center_service::get_center(&state.db, id)
        .await?
        .ok_or_else(|| JsonApiError::not_found("center"))?;
    if found.owner_id != claims.user_id {
        require_admin(claims)?;
    }
    Ok(found)
}

#[utoipa::path(get, path = "/centers", tag = "centers", responses((status = 200, description = "Centers")))]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<models::center::Model>>, JsonApiError> {
    let centers = center_service::list_centers(&state.db, q.region_id, q.search.as_deref(), page).await?;
    Ok(Json(centers))
}

#[utoipa::path(get, path = "/centers/{id}", tag = "centers", responses((status = 200, description = "Center with counters"), (status = 404, description = "Not Found")))]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CenterStats>, JsonApiError> {
    match center_service::get_center_stats(&state.db, id).await? {
        Some(stats) => Ok(Json(stats)),
        None => Err(JsonApiError::not_found("center")),
    }
}

#[utoipa::path(post, path = "/centers", tag = "centers", request_body = crate::openapi::CreateCenterRequest, responses((status = 200, description = "Created"), (status = 403, description = "Forbidden")))]
pub async fn create(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Json(input): Json<CreateCenterInput>,
) -> Result<Json<models::center::Model>, JsonApiError> {
    require_role(&claims, &[Role::Ceo, Role::Admin, Role::Superadmin])?;
    let created = center_service::create_center(
        &state.db,
        &input.name,
        &input.phone,
        &input.address,
        input.image.as_deref(),
        input.region_id,
        claims.user_id,
    )
    .await?;
    info!(id = %created.id, owner = %claims.user_id, name = %created.name, "center_created");
    Ok(Json(created))
}

pub async fn update(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateCenterInput>,
) -> Result<Json<models::center::Model>, JsonApiError> {
    authorize_center_manager(&state, &claims, id).await?;
    let updated = center_service::update_center(
        &state.db,
        id,
        models::center::Patch {
            name: input.name.as_deref(),
            phone: input.phone.as_deref(),
            address: input.address.as_deref(),
            image: input.image.as_deref(),
            region_id: input.region_id,
        },
    )
    .await?;
    info!(id = %updated.id, "center_updated");
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    authorize_center_manager(&state, &claims, id).await?;
    center_service::delete_center(&state.db, id).await?;
    info!(%id, "center_deleted");
    Ok(StatusCode::NO_CONTENT)
}
