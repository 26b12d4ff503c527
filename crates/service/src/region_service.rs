use uuid::Uuid;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use models::{branch, center, region};
use crate::{errors::ServiceError, pagination::Pagination};

/// Create a region; names are unique.
pub async fn create_region(db: &DatabaseConnection, name: &str) -> Result<region::Model, ServiceError> {
    let existing = region::Entity::find()
        .filter(region::Column::Name.eq(name.trim().to_string()))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if existing.is_some() {
        return Err(ServiceError::Conflict("region already exists".into()));
    }
    let created = region::create(db, name).await?;
    Ok(created)
}

pub async fn get_region(db: &DatabaseConnection, id: Uuid) -> Result<Option<region::Model>, ServiceError> {
    region::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// List regions, optionally filtered by a name fragment.
pub async fn list_regions(
    db: &DatabaseConnection,
    search: Option<&str>,
    opts: Pagination,
) -> Result<Vec<region::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let mut query = region::Entity::find().order_by_asc(region::Column::Name);
    if let Some(s) = search {
        query = query.filter(region::Column::Name.contains(s));
    }
    query
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn rename_region(db: &DatabaseConnection, id: Uuid, name: &str) -> Result<region::Model, ServiceError> {
    if get_region(db, id).await?.is_none() {
        return Err(ServiceError::not_found("region"));
    }
    let updated = region::rename(db, id, name).await?;
    Ok(updated)
}

/// Delete a region. Refused while centers or branches still point at it.
pub async fn delete_region(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    if get_region(db, id).await?.is_none() {
        return Ok(false);
    }
    let centers = center::Entity::find()
        .filter(center::Column::RegionId.eq(id))
        .count(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let branches = branch::Entity::find()
        .filter(branch::Column::RegionId.eq(id))
        .count(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if centers > 0 || branches > 0 {
        return Err(ServiceError::Conflict("region still has centers or branches".into()));
    }
    region::hard_delete(db, id).await?;
    Ok(true)
}
