use chrono::{DateTime, Utc};
use uuid::Uuid;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use models::{center, field, reception};
use crate::{errors::ServiceError, pagination::Pagination};

/// Book a visit. One pending reception per user and center at a time.
pub async fn create_reception(
    db: &DatabaseConnection,
    user_id: Uuid,
    center_id: Uuid,
    field_id: Option<Uuid>,
    visit_date: DateTime<Utc>,
) -> Result<reception::Model, ServiceError> {
    let target = center::Entity::find_by_id(center_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if target.is_none() {
        return Err(ServiceError::not_found("center"));
    }
    if let Some(fid) = field_id {
        let f = field::Entity::find_by_id(fid)
            .one(db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        if f.is_none() {
            return Err(ServiceError::not_found("field"));
        }
    }
    let pending = reception::Entity::find()
        .filter(reception::Column::UserId.eq(user_id))
        .filter(reception::Column::CenterId.eq(center_id))
        .filter(reception::Column::Status.eq(reception::Status::Pending.as_str()))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if pending.is_some() {
        return Err(ServiceError::Conflict("a pending reception for this center already exists".into()));
    }
    let created = reception::create(db, user_id, center_id, field_id, visit_date.into()).await?;
    Ok(created)
}

pub async fn get_reception(db: &DatabaseConnection, id: Uuid) -> Result<Option<reception::Model>, ServiceError> {
    reception::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Admin listing across users.
pub async fn list_receptions(
    db: &DatabaseConnection,
    center_id: Option<Uuid>,
    status: Option<reception::Status>,
    opts: Pagination,
) -> Result<Vec<reception::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let mut query = reception::Entity::find().order_by_desc(reception::Column::VisitDate);
    if let Some(cid) = center_id {
        query = query.filter(reception::Column::CenterId.eq(cid));
    }
    if let Some(s) = status {
        query = query.filter(reception::Column::Status.eq(s.as_str()));
    }
    query
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn list_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
    opts: Pagination,
) -> Result<Vec<reception::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    reception::Entity::find()
        .filter(reception::Column::UserId.eq(user_id))
        .order_by_desc(reception::Column::VisitDate)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn set_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: reception::Status,
) -> Result<reception::Model, ServiceError> {
    if get_reception(db, id).await?.is_none() {
        return Err(ServiceError::not_found("reception"));
    }
    let updated = reception::set_status(db, id, status).await?;
    Ok(updated)
}

pub async fn delete_reception(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    if get_reception(db, id).await?.is_none() {
        return Ok(false);
    }
    reception::hard_delete(db, id).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use models::user;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn duplicate_pending_reception_conflicts() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let rname = format!("rcpt_region_{}", Uuid::new_v4());
        let r = models::region::create(&db, &rname).await?;
        let owner = user::create(
            &db,
            "Rcpt",
            "Owner",
            &format!("rcpt_{}@example.com", Uuid::new_v4()),
            "+998901234567",
            user::Role::Ceo,
        )
        .await?;
        let c = models::center::create(&db, "Rcpt Center", "+998712001122", "7 Test Street", None, r.id, owner.id).await?;
        let visitor = user::create(
            &db,
            "Rcpt",
            "Visitor",
            &format!("rcpt_{}@example.com", Uuid::new_v4()),
            "+998905556677",
            user::Role::User,
        )
        .await?;

        let when = Utc::now() + Duration::days(2);
        let first = create_reception(&db, visitor.id, c.id, None, when).await?;
        let dup = create_reception(&db, visitor.id, c.id, None, when).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));

        // Once it is no longer pending a new booking is allowed
        set_status(&db, first.id, reception::Status::Cancelled).await?;
        let second = create_reception(&db, visitor.id, c.id, None, when).await?;

        delete_reception(&db, second.id).await?;
        delete_reception(&db, first.id).await?;
        models::center::hard_delete(&db, c.id).await?;
        user::hard_delete(&db, visitor.id).await?;
        user::hard_delete(&db, owner.id).await?;
        models::region::hard_delete(&db, r.id).await?;
        Ok(())
    }
}
