use uuid::Uuid;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use models::{center, comment};
use crate::{errors::ServiceError, pagination::Pagination};

pub async fn create_comment(
    db: &DatabaseConnection,
    user_id: Uuid,
    center_id: Uuid,
    text: &str,
    star: i16,
) -> Result<comment::Model, ServiceError> {
    let target = center::Entity::find_by_id(center_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if target.is_none() {
        return Err(ServiceError::not_found("center"));
    }
    let created = comment::create(db, user_id, center_id, text, star).await?;
    Ok(created)
}

pub async fn get_comment(db: &DatabaseConnection, id: Uuid) -> Result<Option<comment::Model>, ServiceError> {
    comment::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Newest first; optionally scoped to a center and/or an author.
pub async fn list_comments(
    db: &DatabaseConnection,
    center_id: Option<Uuid>,
    user_id: Option<Uuid>,
    opts: Pagination,
) -> Result<Vec<comment::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let mut query = comment::Entity::find().order_by_desc(comment::Column::CreatedAt);
    if let Some(cid) = center_id {
        query = query.filter(comment::Column::CenterId.eq(cid));
    }
    if let Some(uid) = user_id {
        query = query.filter(comment::Column::UserId.eq(uid));
    }
    query
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn update_comment(
    db: &DatabaseConnection,
    id: Uuid,
    text: Option<&str>,
    star: Option<i16>,
) -> Result<comment::Model, ServiceError> {
    if get_comment(db, id).await?.is_none() {
        return Err(ServiceError::not_found("comment"));
    }
    let updated = comment::update(db, id, text, star).await?;
    Ok(updated)
}

pub async fn delete_comment(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    if get_comment(db, id).await?.is_none() {
        return Ok(false);
    }
    comment::hard_delete(db, id).await?;
    Ok(true)
}
