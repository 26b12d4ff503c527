use uuid::Uuid;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use models::field;
use crate::{errors::ServiceError, pagination::Pagination};

pub async fn create_field(
    db: &DatabaseConnection,
    name: &str,
    image: Option<&str>,
) -> Result<field::Model, ServiceError> {
    let existing = field::Entity::find()
        .filter(field::Column::Name.eq(name.trim().to_string()))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if existing.is_some() {
        return Err(ServiceError::Conflict("field already exists".into()));
    }
    let created = field::create(db, name, image).await?;
    Ok(created)
}

pub async fn get_field(db: &DatabaseConnection, id: Uuid) -> Result<Option<field::Model>, ServiceError> {
    field::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn list_fields(
    db: &DatabaseConnection,
    search: Option<&str>,
    opts: Pagination,
) -> Result<Vec<field::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let mut query = field::Entity::find().order_by_asc(field::Column::Name);
    if let Some(s) = search {
        query = query.filter(field::Column::Name.contains(s));
    }
    query
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn update_field(
    db: &DatabaseConnection,
    id: Uuid,
    name: Option<&str>,
    image: Option<&str>,
) -> Result<field::Model, ServiceError> {
    if get_field(db, id).await?.is_none() {
        return Err(ServiceError::not_found("field"));
    }
    let updated = field::update(db, id, name, image).await?;
    Ok(updated)
}

pub async fn delete_field(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    if get_field(db, id).await?.is_none() {
        return Ok(false);
    }
    field::hard_delete(db, id).await?;
    Ok(true)
}
