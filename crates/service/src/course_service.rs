use uuid::Uuid;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use models::{center, course, field, subject};
use crate::{errors::ServiceError, pagination::Pagination};

#[allow(clippy::too_many_arguments)]
pub async fn create_course(
    db: &DatabaseConnection,
    center_id: Uuid,
    subject_id: Option<Uuid>,
    field_id: Option<Uuid>,
    name: &str,
    description: Option<&str>,
    price: i64,
    duration_weeks: i32,
) -> Result<course::Model, ServiceError> {
    let owner_center = center::Entity::find_by_id(center_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if owner_center.is_none() {
        return Err(ServiceError::not_found("center"));
    }
    if let Some(sid) = subject_id {
        let s = subject::Entity::find_by_id(sid)
            .one(db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        if s.is_none() {
            return Err(ServiceError::not_found("subject"));
        }
    }
    if let Some(fid) = field_id {
        let f = field::Entity::find_by_id(fid)
            .one(db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        if f.is_none() {
            return Err(ServiceError::not_found("field"));
        }
    }
    let created = course::create(db, center_id, subject_id, field_id, name, description, price, duration_weeks).await?;
    Ok(created)
}

pub async fn get_course(db: &DatabaseConnection, id: Uuid) -> Result<Option<course::Model>, ServiceError> {
    course::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn list_courses(
    db: &DatabaseConnection,
    center_id: Option<Uuid>,
    subject_id: Option<Uuid>,
    field_id: Option<Uuid>,
    opts: Pagination,
) -> Result<Vec<course::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let mut query = course::Entity::find().order_by_asc(course::Column::Name);
    if let Some(cid) = center_id {
        query = query.filter(course::Column::CenterId.eq(cid));
    }
    if let Some(sid) = subject_id {
        query = query.filter(course::Column::SubjectId.eq(sid));
    }
    if let Some(fid) = field_id {
        query = query.filter(course::Column::FieldId.eq(fid));
    }
    query
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn update_course(
    db: &DatabaseConnection,
    id: Uuid,
    patch: course::Patch<'_>,
) -> Result<course::Model, ServiceError> {
    if get_course(db, id).await?.is_none() {
        return Err(ServiceError::not_found("course"));
    }
    if let Some(sid) = patch.subject_id {
        let s = subject::Entity::find_by_id(sid)
            .one(db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        if s.is_none() {
            return Err(ServiceError::not_found("subject"));
        }
    }
    if let Some(fid) = patch.field_id {
        let f = field::Entity::find_by_id(fid)
            .one(db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        if f.is_none() {
            return Err(ServiceError::not_found("field"));
        }
    }
    let updated = course::apply_patch(db, id, patch).await?;
    Ok(updated)
}

pub async fn delete_course(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    if get_course(db, id).await?.is_none() {
        return Ok(false);
    }
    course::hard_delete(db, id).await?;
    Ok(true)
}
