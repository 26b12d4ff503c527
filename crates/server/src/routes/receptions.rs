use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::{require_admin, CurrentUser, ServerState};
use crate::errors::JsonApiError;
use models::reception::Status;
use service::pagination::Pagination;
use service::reception_service;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub center_id: Option<Uuid>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateReceptionInput {
    pub center_id: Uuid,
    pub field_id: Option<Uuid>,
    pub visit_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusInput {
    pub status: String,
}

#[utoipa::path(post, path = "/receptions", tag = "receptions", request_body = crate::openapi::CreateReceptionRequest, responses((status = 200, description = "Visit booked"), (status = 409, description = "Pending visit already exists")))]
pub async fn create(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Json(input): Json<CreateReceptionInput>,
) -> Result<Json<models::reception::Model>, JsonApiError> {
    let created =
        reception_service::create_reception(&state.db, claims.user_id, input.center_id, input.field_id, input.visit_date)
            .await?;
    info!(id = %created.id, user_id = %claims.user_id, center_id = %created.center_id, "reception_created");
    Ok(Json(created))
}

/// Admins see every booking; everyone else only their own.
#[utoipa::path(get, path = "/receptions", tag = "receptions", responses((status = 200, description = "Receptions")))]
pub async fn list(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Query(q): Query<ListQuery>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<models::reception::Model>>, JsonApiError> {
    if claims.role.is_admin() {
        let status = q
            .status
            .as_deref()
            .map(Status::parse)
            .transpose()
            .map_err(|e| JsonApiError::new(StatusCode::BAD_REQUEST, e.to_string()))?;
        let all = reception_service::list_receptions(&state.db, q.center_id, status, page).await?;
        return Ok(Json(all));
    }
    let own = reception_service::list_for_user(&state.db, claims.user_id, page).await?;
    Ok(Json(own))
}

pub async fn get(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<models::reception::Model>, JsonApiError> {
    let found = reception_service::get_reception(&state.db, id)
        .await?
        .ok_or_else(|| JsonApiError::not_found("reception"))?;
    if found.user_id != claims.user_id {
        require_admin(&claims)?;
    }
    Ok(Json(found))
}

/// Admins may set any status; the visitor may only cancel their own booking.
pub async fn update_status(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateStatusInput>,
) -> Result<Json<models::reception::Model>, JsonApiError> {
    let status = Status::parse(&input.status).map_err(|e| JsonApiError::new(StatusCode::BAD_REQUEST, e.to_string()))?;
    let found = reception_service::get_reception(&state.db, id)
        .await?
        .ok_or_else(|| JsonApiError::not_found("reception"))?;
    let is_owner_cancel = found.user_id == claims.user_id && status == Status::Cancelled;
    if !is_owner_cancel {
        require_admin(&claims)?;
    }
    let updated = reception_service::set_status(&state.db, id, status).await?;
    info!(id = %updated.id, status = %updated.status, "reception_status_changed");
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    require_admin(&claims)?;
    if reception_service::delete_reception(&state.db, id).await? {
        info!(%id, "reception_deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(JsonApiError::not_found("reception"))
    }
}
