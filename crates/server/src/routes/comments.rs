use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::{require_admin, CurrentUser, ServerState};
use crate::errors::JsonApiError;
use service::comment_service;
use service::pagination::Pagination;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub center_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentInput {
    pub center_id: Uuid,
    pub text: String,
    pub star: i16,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentInput {
    pub text: Option<String>,
    pub star: Option<i16>,
}

pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<models::comment::Model>>, JsonApiError> {
    let comments = comment_service::list_comments(&state.db, q.center_id, q.user_id, page).await?;
    Ok(Json(comments))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::comment::Model>, JsonApiError> {
    match comment_service::get_comment(&state.db, id).await? {
        Some(found) => Ok(Json(found)),
        None => Err(JsonApiError::not_found("comment")),
    }
}

pub async fn create(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Json(input): Json<CreateCommentInput>,
) -> Result<Json<models::comment::Model>, JsonApiError> {
    let created =
        comment_service::create_comment(&state.db, claims.user_id, input.center_id, &input.text, input.star).await?;
    info!(id = %created.id, center_id = %created.center_id, star = created.star, "comment_created");
    Ok(Json(created))
}

/// Only the author can edit a comment.
pub async fn update(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateCommentInput>,
) -> Result<Json<models::comment::Model>, JsonApiError> {
    let found = comment_service::get_comment(&state.db, id)
        .await?
        .ok_or_else(|| JsonApiError::not_found("comment"))?;
    if found.user_id != claims.user_id {
        return Err(JsonApiError::forbidden());
    }
    let updated = comment_service::update_comment(&state.db, id, input.text.as_deref(), input.star).await?;
    info!(id = %updated.id, "comment_updated");
    Ok(Json(updated))
}

/// The author may remove their own comment; admins may remove any.
pub async fn delete(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    let found = comment_service::get_comment(&state.db, id)
        .await?
        .ok_or_else(|| JsonApiError::not_found("comment"))?;
    if found.user_id != claims.user_id {
        require_admin(&claims)?;
    }
    comment_service::delete_comment(&state.db, id).await?;
    info!(%id, "comment_deleted");
    Ok(StatusCode::NO_CONTENT)
}
