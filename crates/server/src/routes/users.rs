use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::{require_admin, require_role, CurrentUser, ServerState};
use crate::errors::JsonApiError;
use models::user::Role;
use service::pagination::Pagination;
use service::user_service;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleInput {
    pub role: String,
}

pub async fn list(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<models::user::Model>>, JsonApiError> {
    require_admin(&claims)?;
    let users = user_service::list_users(&state.db, page).await?;
    Ok(Json(users))
}

pub async fn get(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<models::user::Model>, JsonApiError> {
    if claims.user_id != id {
        require_admin(&claims)?;
    }
    match user_service::get_user(&state.db, id).await? {
        Some(found) => Ok(Json(found)),
        None => Err(JsonApiError::not_found("user")),
    }
}

/// Self-service profile edit; admins may edit anyone.
pub async fn update(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProfileInput>,
) -> Result<Json<models::user::Model>, JsonApiError> {
    if claims.user_id != id {
        require_admin(&claims)?;
    }
    let updated = user_service::update_profile(
        &state.db,
        id,
        input.first_name.as_deref(),
        input.last_name.as_deref(),
        input.phone.as_deref(),
        input.image.as_deref(),
    )
    .await?;
    info!(id = %updated.id, "user_profile_updated");
    Ok(Json(updated))
}

/// Role changes are reserved for superadmins.
pub async fn update_role(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateRoleInput>,
) -> Result<Json<models::user::Model>, JsonApiError> {
    require_role(&claims, &[Role::Superadmin])?;
    let role = Role::parse(&input.role).map_err(|e| JsonApiError::new(StatusCode::BAD_REQUEST, e.to_string()))?;
    let updated = user_service::set_role(&state.db, id, role).await?;
    info!(id = %updated.id, role = %updated.role, "user_role_changed");
    Ok(Json(updated))
}

/// Soft delete. Admins cannot remove themselves.
pub async fn delete(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    require_admin(&claims)?;
    if claims.user_id == id {
        return Err(JsonApiError::new(StatusCode::CONFLICT, "cannot delete own account"));
    }
    if user_service::soft_delete_user(&state.db, id).await? {
        info!(%id, "user_soft_deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(JsonApiError::not_found("user"))
    }
}
