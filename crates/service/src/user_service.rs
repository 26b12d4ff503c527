use uuid::Uuid;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};

use models::user;
use crate::{errors::ServiceError, pagination::Pagination};

/// Get a user by id. Soft-deleted accounts are treated as gone.
pub async fn get_user(db: &DatabaseConnection, id: Uuid) -> Result<Option<user::Model>, ServiceError> {
    let found = user::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found.filter(|u| u.deleted_at.is_none()))
}

/// List live accounts with pagination.
pub async fn list_users(db: &DatabaseConnection, opts: Pagination) -> Result<Vec<user::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    user::Entity::find()
        .filter(user::Column::DeletedAt.is_null())
        .order_by_asc(user::Column::Email)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Update profile fields. Email and role are changed elsewhere.
pub async fn update_profile(
    db: &DatabaseConnection,
    id: Uuid,
    first_name: Option<&str>,
    last_name: Option<&str>,
    phone: Option<&str>,
    image: Option<&str>,
) -> Result<user::Model, ServiceError> {
    let mut am: user::ActiveModel = get_user(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("user"))?
        .into();
    if let Some(first_name) = first_name {
        user::validate_name(first_name)?;
        am.first_name = Set(first_name.to_string());
    }
    if let Some(last_name) = last_name {
        user::validate_name(last_name)?;
        am.last_name = Set(last_name.to_string());
    }
    if let Some(phone) = phone {
        user::validate_phone(phone)?;
        am.phone = Set(phone.to_string());
    }
    if let Some(image) = image {
        am.image = Set(Some(image.to_string()));
    }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated)
}

pub async fn set_role(db: &DatabaseConnection, id: Uuid, role: user::Role) -> Result<user::Model, ServiceError> {
    if get_user(db, id).await?.is_none() {
        return Err(ServiceError::not_found("user"));
    }
    let updated = user::set_role(db, id, role).await?;
    Ok(updated)
}

/// Soft-delete a user (marks deleted_at).
pub async fn soft_delete_user(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    if get_user(db, id).await?.is_none() {
        return Ok(false);
    }
    user::soft_delete(db, id).await?;
    Ok(true)
}

/// Hard-delete a user (removes record).
pub async fn hard_delete_user(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    user::hard_delete(db, id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn user_profile_service() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let email = format!("svc_{}@example.com", Uuid::new_v4());
        let u = user::create(&db, "Svc", "User", &email, "+998901234567", user::Role::User).await?;

        let found = get_user(&db, u.id).await?.unwrap();
        assert_eq!(found.id, u.id);

        let updated = update_profile(&db, u.id, Some("New"), None, Some("+998909090909"), None).await?;
        assert_eq!(updated.first_name, "New");
        assert_eq!(updated.phone, "+998909090909");

        let promoted = set_role(&db, u.id, user::Role::Admin).await?;
        assert_eq!(promoted.role, "admin");

        assert!(soft_delete_user(&db, u.id).await?);
        assert!(get_user(&db, u.id).await?.is_none());
        // Second soft delete is a no-op
        assert!(!soft_delete_user(&db, u.id).await?);

        hard_delete_user(&db, u.id).await?;
        Ok(())
    }
}
