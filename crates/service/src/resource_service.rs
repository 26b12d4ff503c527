use uuid::Uuid;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use models::resource;
use crate::{errors::ServiceError, pagination::Pagination};

#[allow(clippy::too_many_arguments)]
pub async fn create_resource(
    db: &DatabaseConnection,
    user_id: Uuid,
    name: &str,
    description: Option<&str>,
    media: &str,
    image: Option<&str>,
    category: &str,
) -> Result<resource::Model, ServiceError> {
    let created = resource::create(db, user_id, name, description, media, image, category).await?;
    Ok(created)
}

pub async fn get_resource(db: &DatabaseConnection, id: Uuid) -> Result<Option<resource::Model>, ServiceError> {
    resource::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn list_resources(
    db: &DatabaseConnection,
    category: Option<&str>,
    user_id: Option<Uuid>,
    search: Option<&str>,
    opts: Pagination,
) -> Result<Vec<resource::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let mut query = resource::Entity::find().order_by_desc(resource::Column::CreatedAt);
    if let Some(c) = category {
        query = query.filter(resource::Column::Category.eq(c.trim().to_ascii_lowercase()));
    }
    if let Some(uid) = user_id {
        query = query.filter(resource::Column::UserId.eq(uid));
    }
    if let Some(s) = search {
        query = query.filter(resource::Column::Name.contains(s));
    }
    query
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn update_resource(
    db: &DatabaseConnection,
    id: Uuid,
    patch: resource::Patch<'_>,
) -> Result<resource::Model, ServiceError> {
    if get_resource(db, id).await?.is_none() {
        return Err(ServiceError::not_found("resource"));
    }
    let updated = resource::apply_patch(db, id, patch).await?;
    Ok(updated)
}

pub async fn delete_resource(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    if get_resource(db, id).await?.is_none() {
        return Ok(false);
    }
    resource::hard_delete(db, id).await?;
    Ok(true)
}
