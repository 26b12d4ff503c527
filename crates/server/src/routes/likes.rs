use axum::{extract::{Path, State}, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::{CurrentUser, ServerState};
use crate::errors::JsonApiError;
use service::like_service;

#[derive(Debug, Deserialize)]
pub struct CreateLikeInput {
    pub center_id: Uuid,
}

pub async fn create(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Json(input): Json<CreateLikeInput>,
) -> Result<Json<models::like::Model>, JsonApiError> {
    let created = like_service::like_center(&state.db, claims.user_id, input.center_id).await?;
    info!(user_id = %claims.user_id, center_id = %input.center_id, "center_liked");
    Ok(Json(created))
}

/// Remove the caller's like for a center.
pub async fn delete(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(center_id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    if like_service::unlike_center(&state.db, claims.user_id, center_id).await? {
        info!(user_id = %claims.user_id, center_id = %center_id, "center_unliked");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(JsonApiError::not_found("like"))
    }
}

pub async fn mine(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
) -> Result<Json<Vec<models::like::Model>>, JsonApiError> {
    let likes = like_service::list_for_user(&state.db, claims.user_id).await?;
    Ok(Json(likes))
}
