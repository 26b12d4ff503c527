use crate::db::connect;
use crate::{comment, otp_code, reception, region, user, user_credentials};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use anyhow::Result;
use chrono::{Duration, Utc};
use migration::MigratorTrait;
use uuid::Uuid;

/// Setup test database with migrations
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Test region CRUD operations
#[tokio::test]
async fn test_region_crud() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let region_name = format!("test_region_{}", Uuid::new_v4());
    let created = region::create(&db, &region_name).await?;
    assert_eq!(created.name, region_name);

    let found = region::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.is_some());
    assert_eq!(found.unwrap().name, region_name);

    let found_by_name = region::Entity::find()
        .filter(region::Column::Name.eq(region_name.clone()))
        .one(&db)
        .await?;
    assert_eq!(found_by_name.unwrap().id, created.id);

    let renamed = region::rename(&db, created.id, "Tashkent").await?;
    assert_eq!(renamed.name, "Tashkent");

    region::hard_delete(&db, created.id).await?;
    assert!(region::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

/// Test user CRUD operations, including soft delete
#[tokio::test]
async fn test_user_crud() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let email = format!("test_{}@example.com", Uuid::new_v4());
    let created = user::create(&db, "Test", "User", &email, "+998901112233", user::Role::User).await?;

    assert_eq!(created.email, email);
    assert_eq!(created.role, "user");
    assert!(!created.is_verified);

    let found = user::find_by_email(&db, &email).await?;
    assert_eq!(found.map(|u| u.id), Some(created.id));

    let verified = user::set_verified(&db, created.id).await?;
    assert!(verified.is_verified);

    let promoted = user::set_role(&db, created.id, user::Role::Ceo).await?;
    assert_eq!(promoted.role, "ceo");

    // Soft-deleted users disappear from email lookups but the row remains
    user::soft_delete(&db, created.id).await?;
    assert!(user::find_by_email(&db, &email).await?.is_none());
    let raw = user::Entity::find_by_id(created.id).one(&db).await?;
    assert!(raw.unwrap().deleted_at.is_some());

    user::hard_delete(&db, created.id).await?;
    assert!(user::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

/// Test credentials upsert behavior
#[tokio::test]
async fn test_user_credentials_upsert() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let email = format!("creds_{}@example.com", Uuid::new_v4());
    let u = user::create(&db, "Creds", "User", &email, "+998909998877", user::Role::User).await?;

    let first = user_credentials::upsert_password(&db, u.id, "hash-one".into(), "argon2").await?;
    let second = user_credentials::upsert_password(&db, u.id, "hash-two".into(), "argon2").await?;
    assert_eq!(first.id, second.id);
    assert_eq!(second.password_hash, "hash-two");

    let found = user_credentials::find_for_user(&db, u.id).await?;
    assert_eq!(found.map(|c| c.password_hash), Some("hash-two".into()));

    user::hard_delete(&db, u.id).await?;
    Ok(())
}

/// Test OTP issue/lookup/consume cycle
#[tokio::test]
async fn test_otp_code_cycle() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let email = format!("otp_{}@example.com", Uuid::new_v4());
    let expires = (Utc::now() + Duration::seconds(300)).into();
    let issued = otp_code::create(&db, &email, "123456", expires).await?;
    assert!(!issued.consumed);

    let latest = otp_code::latest_for_email(&db, &email).await?.unwrap();
    assert_eq!(latest.id, issued.id);

    otp_code::consume(&db, issued.id).await?;
    assert!(otp_code::latest_for_email(&db, &email).await?.is_none());

    // Non-numeric codes are rejected before hitting the database
    assert!(otp_code::create(&db, &email, "12a456", expires).await.is_err());

    otp_code::Entity::delete_by_id(issued.id).exec(&db).await?;
    Ok(())
}

/// Test reception creation and status transitions
#[tokio::test]
async fn test_reception_status() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let region_name = format!("rcpt_region_{}", Uuid::new_v4());
    let r = region::create(&db, &region_name).await?;
    let owner = user::create(
        &db,
        "Owner",
        "User",
        &format!("owner_{}@example.com", Uuid::new_v4()),
        "+998901234567",
        user::Role::Ceo,
    )
    .await?;
    let c = crate::center::create(&db, "Reception Center", "+998712223344", "1 Navoi Street", None, r.id, owner.id).await?;
    let visitor = user::create(
        &db,
        "Visitor",
        "User",
        &format!("visitor_{}@example.com", Uuid::new_v4()),
        "+998905556677",
        user::Role::User,
    )
    .await?;

    // Past visit dates are rejected
    let yesterday = (Utc::now() - Duration::days(1)).into();
    assert!(reception::create(&db, visitor.id, c.id, None, yesterday).await.is_err());

    let tomorrow = (Utc::now() + Duration::days(1)).into();
    let created = reception::create(&db, visitor.id, c.id, None, tomorrow).await?;
    assert_eq!(created.status, "pending");

    let confirmed = reception::set_status(&db, created.id, reception::Status::Confirmed).await?;
    assert_eq!(confirmed.status, "confirmed");

    crate::center::hard_delete(&db, c.id).await?;
    user::hard_delete(&db, visitor.id).await?;
    user::hard_delete(&db, owner.id).await?;
    region::hard_delete(&db, r.id).await?;
    Ok(())
}

/// Test comment validation through the model helpers
#[tokio::test]
async fn test_comment_crud() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let region_name = format!("cmt_region_{}", Uuid::new_v4());
    let r = region::create(&db, &region_name).await?;
    let owner = user::create(
        &db,
        "Owner",
        "User",
        &format!("cmt_owner_{}@example.com", Uuid::new_v4()),
        "+998901234567",
        user::Role::Ceo,
    )
    .await?;
    let c = crate::center::create(&db, "Comment Center", "+998712223344", "3 Mustaqillik Square", None, r.id, owner.id).await?;
    let author = user::create(
        &db,
        "Author",
        "User",
        &format!("cmt_author_{}@example.com", Uuid::new_v4()),
        "+998905556677",
        user::Role::User,
    )
    .await?;

    assert!(comment::create(&db, author.id, c.id, "", 3).await.is_err());
    assert!(comment::create(&db, author.id, c.id, "ok", 9).await.is_err());

    let created = comment::create(&db, author.id, c.id, "Solid math prep", 4).await?;
    let updated = comment::update(&db, created.id, Some("Solid math prep, small groups"), Some(5)).await?;
    assert_eq!(updated.star, 5);

    comment::hard_delete(&db, created.id).await?;
    crate::center::hard_delete(&db, c.id).await?;
    user::hard_delete(&db, author.id).await?;
    user::hard_delete(&db, owner.id).await?;
    region::hard_delete(&db, r.id).await?;
    Ok(())
}
