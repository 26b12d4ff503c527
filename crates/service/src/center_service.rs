use serde::Serialize;
use uuid::Uuid;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use models::{center, comment, like, region};
use crate::{errors::ServiceError, pagination::Pagination};

/// Center detail enriched with engagement counters.
#[derive(Debug, Clone, Serialize)]
pub struct CenterStats {
    #[serde(flatten)]
    pub center: center::Model,
    pub like_count: u64,
    pub comment_count: u64,
    pub average_star: Option<f64>,
}

#[allow(clippy::too_many_arguments)]
pub async fn create_center(
    db: &DatabaseConnection,
    name: &str,
    phone: &str,
    address: &str,
    image: Option<&str>,
    region_id: Uuid,
    owner_id: Uuid,
) -> Result<center::Model, ServiceError> {
    let region = region::Entity::find_by_id(region_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if region.is_none() {
        return Err(ServiceError::not_found("region"));
    }
    let created = center::create(db, name, phone, address, image, region_id, owner_id).await?;
    Ok(created)
}

pub async fn get_center(db: &DatabaseConnection, id: Uuid) -> Result<Option<center::Model>, ServiceError> {
    center::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Center plus like/comment counters and average star rating.
pub async fn get_center_stats(db: &DatabaseConnection, id: Uuid) -> Result<Option<CenterStats>, ServiceError> {
    let Some(found) = get_center(db, id).await? else {
        return Ok(None);
    };
    let like_count = like::Entity::find()
        .filter(like::Column::CenterId.eq(id))
        .count(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let comments = comment::Entity::find()
        .filter(comment::Column::CenterId.eq(id))
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let comment_count = comments.len() as u64;
    let average_star = if comments.is_empty() {
        None
    } else {
        Some(comments.iter().map(|c| c.star as f64).sum::<f64>() / comments.len() as f64)
    };
    Ok(Some(CenterStats { center: found, like_count, comment_count, average_star }))
}

/// List centers, optionally scoped to a region and/or a name fragment.
pub async fn list_centers(
    db: &DatabaseConnection,
    region_id: Option<Uuid>,
    search: Option<&str>,
    opts: Pagination,
) -> Result<Vec<center::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let mut query = center::Entity::find().order_by_asc(center::Column::Name);
    if let Some(rid) = region_id {
        query = query.filter(center::Column::RegionId.eq(rid));
    }
    if let Some(s) = search {
        query = query.filter(center::Column::Name.contains(s));
    }
    query
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn update_center(
    db: &DatabaseConnection,
    id: Uuid,
    patch: center::Patch<'_>,
) -> Result<center::Model, ServiceError> {
    if get_center(db, id).await?.is_none() {
        return Err(ServiceError::not_found("center"));
    }
    if let Some(rid) = patch.region_id {
        let region = region::Entity::find_by_id(rid)
            .one(db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        if region.is_none() {
            return Err(ServiceError::not_found("region"));
        }
    }
    let updated = center::apply_patch(db, id, patch).await?;
    Ok(updated)
}

/// Delete a center; branches, courses, comments and likes go with it.
pub async fn delete_center(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    if get_center(db, id).await?.is_none() {
        return Ok(false);
    }
    center::hard_delete(db, id).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::user;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn center_crud_and_stats() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let rname = format!("svc_region_{}", Uuid::new_v4());
        let r = models::region::create(&db, &rname).await?;
        let owner = user::create(
            &db,
            "Svc",
            "Owner",
            &format!("svc_{}@example.com", Uuid::new_v4()),
            "+998901234567",
            user::Role::Ceo,
        )
        .await?;

        let c = create_center(&db, "Svc Center", "+998712001122", "1 Test Street", None, r.id, owner.id).await?;
        assert_eq!(c.region_id, r.id);

        // Unknown region is rejected
        let err = create_center(&db, "Bad", "+998712001122", "1 Test Street", None, Uuid::new_v4(), owner.id).await;
        assert!(matches!(err, Err(ServiceError::NotFound(_))));

        let student = user::create(
            &db,
            "Svc",
            "Student",
            &format!("svc_{}@example.com", Uuid::new_v4()),
            "+998905556677",
            user::Role::User,
        )
        .await?;
        models::comment::create(&db, student.id, c.id, "good", 4).await?;
        models::comment::create(&db, student.id, c.id, "great", 5).await?;
        models::like::create(&db, student.id, c.id).await?;

        let stats = get_center_stats(&db, c.id).await?.unwrap();
        assert_eq!(stats.like_count, 1);
        assert_eq!(stats.comment_count, 2);
        assert_eq!(stats.average_star, Some(4.5));

        let updated = update_center(
            &db,
            c.id,
            center::Patch { name: Some("Svc Center 2"), phone: None, address: None, image: None, region_id: None },
        )
        .await?;
        assert_eq!(updated.name, "Svc Center 2");

        assert!(delete_center(&db, c.id).await?);
        assert!(!delete_center(&db, c.id).await?);

        user::hard_delete(&db, student.id).await?;
        user::hard_delete(&db, owner.id).await?;
        models::region::hard_delete(&db, r.id).await?;
        Ok(())
    }
}
