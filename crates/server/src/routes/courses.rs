use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::{require_admin, AuthClaims, CurrentUser, ServerState};
use crate::errors::JsonApiError;
use service::center_service;
use service::course_service;
use service::pagination::Pagination;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub center_id: Option<Uuid>,
    pub subject_id: Option<Uuid>,
    pub field_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCourseInput {
    pub center_id: Uuid,
    pub subject_id: Option<Uuid>,
    pub field_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub duration_weeks: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCourseInput {
    pub subject_id: Option<Uuid>,
    pub field_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub duration_weeks: Option<i32>,
}

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
) -> Result<Json<Vec<models::course::Model>>, JsonApiError> {
    let courses = course_service::list_courses(&state.db, q.center_id, q.subject_id, q.field_id, page).await?;
    Ok(Json(courses))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::course::Model>, JsonApiError> {
    match course_service::get_course(&state.db, id).await? {
        Some(found) => Ok(Json(found)),
        None => Err(JsonApiError::not_found("course")),
    }
}

pub async fn create(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Json(input): Json<CreateCourseInput>,
) -> Result<Json<models::course::Model>, JsonApiError> {
    authorize_parent_center(&state, &claims, input.center_id).await?;
    let created = course_service::create_course(
        &state.db,
        input.center_id,
        input.subject_id,
        input.field_id,
        &input.name,
        input.description.as_deref(),
        input.price,
        input.duration_weeks,
    )
    .await?;
    info!(id = %created.id, center_id = %created.center_id, "course_created");
    Ok(Json(created))
}

pub async fn update(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateCourseInput>,
) -> Result<Json<models::course::Model>, JsonApiError> {
    let found = course_service::get_course(&state.db, id)
        .await?
        .ok_or_else(|| JsonApiError::not_found("course"))?;
    authorize_parent_center(&state, &claims, found.center_id).await?;
    let updated = course_service::update_course(
        &state.db,
        id,
        models::course::Patch {
            subject_id: input.subject_id,
            field_id: input.field_id,
            name: input.name.as_deref(),
            description: input.description.as_deref(),
            price: input.price,
            duration_weeks: input.duration_weeks,
        },
    )
    .await?;
    info!(id = %updated.id, "course_updated");
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<ServerState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    let found = course_service::get_course(&state.db, id)
        .await?
        .ok_or_else(|| JsonApiError::not_found("course"))?;
    authorize_parent_center(&state, &claims, found.center_id).await?;
    course_service::delete_course(&state.db, id).await?;
    info!(%id, "course_deleted");
    Ok(StatusCode::NO_CONTENT)
}
