use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, region, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "center")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub image: Option<String>,
    pub region_id: Uuid,
    pub owner_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Region,
    Owner,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Region => Entity::belongs_to(region::Entity)
                .from(Column::RegionId)
                .to(region::Column::Id)
                .into(),
            Relation::Owner => Entity::belongs_to(user::Entity)
                .from(Column::OwnerId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    Ok(())
}

pub fn validate_address(address: &str) -> Result<(), errors::ModelError> {
    if address.trim().is_empty() {
        return Err(errors::ModelError::Validation("address required".into()));
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    phone: &str,
    address: &str,
    image: Option<&str>,
    region_id: Uuid,
    owner_id: Uuid,
) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    user::validate_phone(phone)?;
    validate_address(address)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.trim().to_string()),
        phone: Set(phone.to_string()),
        address: Set(address.trim().to_string()),
        image: Set(image.map(|s| s.to_string())),
        region_id: Set(region_id),
        owner_id: Set(owner_id),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub struct Patch<'a> {
    pub name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub image: Option<&'a str>,
    pub region_id: Option<Uuid>,
}

pub async fn apply_patch(db: &DatabaseConnection, id: Uuid, patch: Patch<'_>) -> Result<Model, errors::ModelError> {
    let mut found: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?
        .ok_or_else(|| errors::ModelError::Validation("center not found".into()))?
        .into();
    if let Some(name) = patch.name {
        validate_name(name)?;
        found.name = Set(name.trim().to_string());
    }
    if let Some(phone) = patch.phone {
        user::validate_phone(phone)?;
        found.phone = Set(phone.to_string());
    }
    if let Some(address) = patch.address {
        validate_address(address)?;
        found.address = Set(address.trim().to_string());
    }
    if let Some(image) = patch.image {
        found.image = Set(Some(image.to_string()));
    }
    if let Some(region_id) = patch.region_id {
        found.region_id = Set(region_id);
    }
    found.updated_at = Set(Utc::now().into());
    found.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn hard_delete(db: &DatabaseConnection, id: Uuid) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}
