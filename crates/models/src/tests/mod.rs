/// CRUD operations tests for all models
pub mod crud_tests;

/// Integration tests combining multiple entities
pub mod integration_tests {
    use crate::db::connect;
    use crate::{branch, center, comment, course, like, region, user};
    use sea_orm::EntityTrait;
    use migration::MigratorTrait;
    use anyhow::Result;
    use uuid::Uuid;

    /// Test complete workflow: region -> owner -> center -> branch -> course -> comment -> like
    #[tokio::test]
    async fn test_complete_workflow() -> Result<()> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }

        let db = connect().await?;
        migration::Migrator::up(&db, None).await?;

        let region_name = format!("workflow_region_{}", Uuid::new_v4());
        let test_region = region::create(&db, &region_name).await?;

        let owner_email = format!("workflow_{}@example.com", Uuid::new_v4());
        let owner = user::create(&db, "Olim", "Karimov", &owner_email, "+998901234567", user::Role::Ceo).await?;

        let test_center = center::create(
            &db,
            "Workflow Learning Center",
            "+998712001122",
            "12 Amir Temur Avenue",
            None,
            test_region.id,
            owner.id,
        )
        .await?;

        let test_branch = branch::create(
            &db,
            "Workflow Center Chilonzor",
            "+998712003344",
            "5 Chilonzor Street",
            None,
            test_region.id,
            test_center.id,
        )
        .await?;
        assert_eq!(test_branch.center_id, test_center.id);

        let test_course = course::create(
            &db,
            test_center.id,
            None,
            None,
            "General English B2",
            Some("Evening group"),
            450_000,
            12,
        )
        .await?;
        assert_eq!(test_course.center_id, test_center.id);

        let student_email = format!("student_{}@example.com", Uuid::new_v4());
        let student = user::create(&db, "Aziza", "Tosheva", &student_email, "+998935554433", user::Role::User).await?;

        let test_comment = comment::create(&db, student.id, test_center.id, "Great teachers", 5).await?;
        assert_eq!(test_comment.star, 5);

        let test_like = like::create(&db, student.id, test_center.id).await?;
        let found_like = like::find_by_user_center(&db, student.id, test_center.id).await?;
        assert_eq!(found_like.map(|l| l.id), Some(test_like.id));

        // Deleting the center cascades to branches, courses, comments and likes
        center::hard_delete(&db, test_center.id).await?;
        assert!(branch::Entity::find_by_id(test_branch.id).one(&db).await?.is_none());
        assert!(course::Entity::find_by_id(test_course.id).one(&db).await?.is_none());
        assert!(comment::Entity::find_by_id(test_comment.id).one(&db).await?.is_none());
        assert!(like::Entity::find_by_id(test_like.id).one(&db).await?.is_none());

        // Cleanup
        user::hard_delete(&db, student.id).await?;
        user::hard_delete(&db, owner.id).await?;
        region::hard_delete(&db, test_region.id).await?;
        Ok(())
    }
}
