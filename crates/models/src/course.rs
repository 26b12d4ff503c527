use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{center, errors, field, subject};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub center_id: Uuid,
    pub subject_id: Option<Uuid>,
    pub field_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    /// Minor currency units, never negative.
    pub price: i64,
    pub duration_weeks: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Center,
    Subject,
    Field,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Center => Entity::belongs_to(center::Entity)
                .from(Column::CenterId)
                .to(center::Column::Id)
                .into(),
            Relation::Subject => Entity::belongs_to(subject::Entity)
                .from(Column::SubjectId)
                .to(subject::Column::Id)
                .into(),
            Relation::Field => Entity::belongs_to(field::Entity)
                .from(Column::FieldId)
                .to(field::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_price(price: i64) -> Result<(), errors::ModelError> {
    if price < 0 {
        return Err(errors::ModelError::Validation("price must not be negative".into()));
    }
    Ok(())
}

pub fn validate_duration(weeks: i32) -> Result<(), errors::ModelError> {
    if weeks <= 0 {
        return Err(errors::ModelError::Validation("duration_weeks must be positive".into()));
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn create(
    db: &DatabaseConnection,
    center_id: Uuid,
    subject_id: Option<Uuid>,
    field_id: Option<Uuid>,
    name: &str,
    description: Option<&str>,
    price: i64,
    duration_weeks: i32,
) -> Result<Model, errors::ModelError> {
    center::validate_name(name)?;
    validate_price(price)?;
    validate_duration(duration_weeks)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        center_id: Set(center_id),
        subject_id: Set(subject_id),
        field_id: Set(field_id),
        name: Set(name.trim().to_string()),
        description: Set(description.map(|s| s.to_string())),
        price: Set(price),
        duration_weeks: Set(duration_weeks),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub struct Patch<'a> {
    pub subject_id: Option<Uuid>,
    pub field_id: Option<Uuid>,
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub price: Option<i64>,
    pub duration_weeks: Option<i32>,
}

pub async fn apply_patch(db: &DatabaseConnection, id: Uuid, patch: Patch<'_>) -> Result<Model, errors::ModelError> {
    let mut found: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?
        .ok_or_else(|| errors::ModelError::Validation("course not found".into()))?
        .into();
    if let Some(subject_id) = patch.subject_id {
        found.subject_id = Set(Some(subject_id));
    }
    if let Some(field_id) = patch.field_id {
        found.field_id = Set(Some(field_id));
    }
    if let Some(name) = patch.name {
        center::validate_name(name)?;
        found.name = Set(name.trim().to_string());
    }
    if let Some(description) = patch.description {
        found.description = Set(Some(description.to_string()));
    }
    if let Some(price) = patch.price {
        validate_price(price)?;
        found.price = Set(price);
    }
    if let Some(weeks) = patch.duration_weeks {
        validate_duration(weeks)?;
        found.duration_weeks = Set(weeks);
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
    fn price_must_not_be_negative() {
        assert!(validate_price(0).is_ok());
        assert!(validate_price(150_000).is_ok());
        assert!(validate_price(-1).is_err());
    }

    #[test]
    fn duration_must_be_positive() {
        assert!(validate_duration(1).is_ok());
        assert!(validate_duration(0).is_err());
        assert!(validate_duration(-4).is_err());
    }
}
