use uuid::Uuid;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use models::subject;
use crate::{errors::ServiceError, pagination::Pagination};

pub async fn create_subject(
    db: &DatabaseConnection,
    name: &str,
    image: Option<&str>,
) -> Result<subject::Model, ServiceError> {
    let existing = subject::Entity::find()
        .filter(subject::Column::Name.eq(name.trim().to_string()))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if existing.is_some() {
        return Err(ServiceError::Conflict("subject already exists".into()));
    }
    let created = subject::create(db, name, image).await?;
    Ok(created)
}

pub async fn get_subject(db: &DatabaseConnection, id: Uuid) -> Result<Option<subject::Model>, ServiceError> {
    subject::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn list_subjects(
    db: &DatabaseConnection,
    search: Option<&str>,
    opts: Pagination,
) -> Result<Vec<subject::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let mut query = subject::Entity::find().order_by_asc(subject::Column::Name);
    if let Some(s) = search {
        query = query.filter(subject::Column::Name.contains(s));
    }
    query
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn update_subject(
    db: &DatabaseConnection,
    id: Uuid,
    name: Option<&str>,
    image: Option<&str>,
) -> Result<subject::Model, ServiceError> {
    if get_subject(db, id).await?.is_none() {
        return Err(ServiceError::not_found("subject"));
    }
    let updated = subject::update(db, id, name, image).await?;
    Ok(updated)
}

pub async fn delete_subject(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    if get_subject(db, id).await?.is_none() {
        return Ok(false);
    }
    subject::hard_delete(db, id).await?;
    Ok(true)
}
