use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{center, errors, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub center_id: Uuid,
    pub text: String,
    pub star: i16,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Center,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
            Relation::Center => Entity::belongs_to(center::Entity)
                .from(Column::CenterId)
                .to(center::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_text(text: &str) -> Result<(), errors::ModelError> {
    if text.trim().is_empty() {
        return Err(errors::ModelError::Validation("text required".into()));
    }
    Ok(())
}

pub fn validate_star(star: i16) -> Result<(), errors::ModelError> {
    if !(1..=5).contains(&star) {
        return Err(errors::ModelError::Validation("star must be in 1..=5".into()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    user_id: Uuid,
    center_id: Uuid,
    text: &str,
    star: i16,
) -> Result<Model, errors::ModelError> {
    validate_text(text)?;
    validate_star(star)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        center_id: Set(center_id),
        text: Set(text.trim().to_string()),
        star: Set(star),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn update(
    db: &DatabaseConnection,
    id: Uuid,
    text: Option<&str>,
    star: Option<i16>,
) -> Result<Model, errors::ModelError> {
    let mut found: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?
        .ok_or_else(|| errors::ModelError::Validation("comment not found".into()))?
        .into();
    if let Some(text) = text {
        validate_text(text)?;
        found.text = Set(text.trim().to_string());
    }
    if let Some(star) = star {
        validate_star(star)?;
        found.star = Set(star);
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
    fn star_bounds() {
        assert!(validate_star(1).is_ok());
        assert!(validate_star(5).is_ok());
        assert!(validate_star(0).is_err());
        assert!(validate_star(6).is_err());
    }
}
