use uuid::Uuid;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use models::{center, like};
use crate::errors::ServiceError;

/// Record a like. One per user per center.
pub async fn like_center(
    db: &DatabaseConnection,
    user_id: Uuid,
    center_id: Uuid,
) -> Result<like::Model, ServiceError> {
    let target = center::Entity::find_by_id(center_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if target.is_none() {
        return Err(ServiceError::not_found("center"));
    }
    if like::find_by_user_center(db, user_id, center_id).await?.is_some() {
        return Err(ServiceError::Conflict("center already liked".into()));
    }
    let created = like::create(db, user_id, center_id).await?;
    Ok(created)
}

/// Remove the caller's like; Ok(false) when there was none.
pub async fn unlike_center(
    db: &DatabaseConnection,
    user_id: Uuid,
    center_id: Uuid,
) -> Result<bool, ServiceError> {
    match like::find_by_user_center(db, user_id, center_id).await? {
        Some(found) => {
            like::hard_delete(db, found.id).await?;
            Ok(true)
        }
        None => Ok(false),
    }
}

pub async fn list_for_user(db: &DatabaseConnection, user_id: Uuid) -> Result<Vec<like::Model>, ServiceError> {
    like::Entity::find()
        .filter(like::Column::UserId.eq(user_id))
        .order_by_desc(like::Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn count_for_center(db: &DatabaseConnection, center_id: Uuid) -> Result<u64, ServiceError> {
    like::Entity::find()
        .filter(like::Column::CenterId.eq(center_id))
        .count(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}
