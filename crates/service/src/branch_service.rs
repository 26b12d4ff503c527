use uuid::Uuid;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use models::{branch, center, region};
use crate::{errors::ServiceError, pagination::Pagination};

#[allow(clippy::too_many_arguments)]
pub async fn create_branch(
    db: &DatabaseConnection,
    name: &str,
    phone: &str,
    address: &str,
    image: Option<&str>,
    region_id: Uuid,
    center_id: Uuid,
) -> Result<branch::Model, ServiceError> {
    let owner_center = center::Entity::find_by_id(center_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if owner_center.is_none() {
        return Err(ServiceError::not_found("center"));
    }
    let found_region = region::Entity::find_by_id(region_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if found_region.is_none() {
        return Err(ServiceError::not_found("region"));
    }
    let created = branch::create(db, name, phone, address, image, region_id, center_id).await?;
    Ok(created)
}

pub async fn get_branch(db: &DatabaseConnection, id: Uuid) -> Result<Option<branch::Model>, ServiceError> {
    branch::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn list_branches(
    db: &DatabaseConnection,
    center_id: Option<Uuid>,
    region_id: Option<Uuid>,
    opts: Pagination,
) -> Result<Vec<branch::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let mut query = branch::Entity::find().order_by_asc(branch::Column::Name);
    if let Some(cid) = center_id {
        query = query.filter(branch::Column::CenterId.eq(cid));
    }
    if let Some(rid) = region_id {
        query = query.filter(branch::Column::RegionId.eq(rid));
    }
    query
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn update_branch(
    db: &DatabaseConnection,
    id: Uuid,
    patch: branch::Patch<'_>,
) -> Result<branch::Model, ServiceError> {
    if get_branch(db, id).await?.is_none() {
        return Err(ServiceError::not_found("branch"));
    }
    if let Some(rid) = patch.region_id {
        let found_region = region::Entity::find_by_id(rid)
            .one(db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        if found_region.is_none() {
            return Err(ServiceError::not_found("region"));
        }
    }
    let updated = branch::apply_patch(db, id, patch).await?;
    Ok(updated)
}

pub async fn delete_branch(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    if get_branch(db, id).await?.is_none() {
        return Ok(false);
    }
    branch::hard_delete(db, id).await?;
    Ok(true)
}
