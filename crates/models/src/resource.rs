use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "resource")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub media: String,
    pub image: Option<String>,
    pub category: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_media(url: &str) -> Result<(), errors::ModelError> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(errors::ModelError::Validation("media must start with http(s)".into()));
    }
    Ok(())
}

pub fn validate_category(category: &str) -> Result<String, errors::ModelError> {
    let c = category.trim().to_ascii_lowercase();
    if c.is_empty() || c.len() > 64 {
        return Err(errors::ModelError::Validation("category must be a short non-empty token".into()));
    }
    Ok(c)
}

#[allow(clippy::too_many_arguments)]
pub async fn create(
    db: &DatabaseConnection,
    user_id: Uuid,
    name: &str,
    description: Option<&str>,
    media: &str,
    image: Option<&str>,
    category: &str,
) -> Result<Model, errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    validate_media(media)?;
    let category = validate_category(category)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        name: Set(name.trim().to_string()),
        description: Set(description.map(|s| s.to_string())),
        media: Set(media.to_string()),
        image: Set(image.map(|s| s.to_string())),
        category: Set(category),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub struct Patch<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub media: Option<&'a str>,
    pub image: Option<&'a str>,
    pub category: Option<&'a str>,
}

pub async fn apply_patch(db: &DatabaseConnection, id: Uuid, patch: Patch<'_>) -> Result<Model, errors::ModelError> {
    let mut found: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?
        .ok_or_else(|| errors::ModelError::Validation("resource not found".into()))?
        .into();
    if let Some(name) = patch.name {
        if name.trim().is_empty() {
            return Err(errors::ModelError::Validation("name required".into()));
        }
        found.name = Set(name.trim().to_string());
    }
    if let Some(description) = patch.description {
        found.description = Set(Some(description.to_string()));
    }
    if let Some(media) = patch.media {
        validate_media(media)?;
        found.media = Set(media.to_string());
    }
    if let Some(image) = patch.image {
        found.image = Set(Some(image.to_string()));
    }
    if let Some(category) = patch.category {
        found.category = Set(validate_category(category)?);
    }
    found.updated_at = Set(Utc::now().into());
    found.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn hard_delete(db: &DatabaseConnection, id: Uuid) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_requires_http_prefix() {
        assert!(validate_media("https://cdn.example.com/v.mp4").is_ok());
        assert!(validate_media("ftp://example.com/v.mp4").is_err());
    }

    #[test]
    fn category_is_normalized() {
        assert_eq!(validate_category(" Video ").unwrap(), "video");
        assert!(validate_category("").is_err());
    }
}
