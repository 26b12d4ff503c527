use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // OtpCode: lookups are by email, newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_otp_code_email")
                    .table(OtpCode::Table)
                    .col(OtpCode::Email)
                    .to_owned(),
            )
            .await?;

        // Center: region filter on listings
        manager
            .create_index(
                Index::create()
                    .name("idx_center_region")
                    .table(Center::Table)
                    .col(Center::RegionId)
                    .to_owned(),
            )
            .await?;

        // Branch: listed per center
        manager
            .create_index(
                Index::create()
                    .name("idx_branch_center")
                    .table(Branch::Table)
                    .col(Branch::CenterId)
                    .to_owned(),
            )
            .await?;

        // Course: listed per center
        manager
            .create_index(
                Index::create()
                    .name("idx_course_center")
                    .table(Course::Table)
                    .col(Course::CenterId)
                    .to_owned(),
            )
            .await?;

        // Comment: listed per center
        manager
            .create_index(
                Index::create()
                    .name("idx_comment_center")
                    .table(Comment::Table)
                    .col(Comment::CenterId)
                    .to_owned(),
            )
            .await?;

        // Like: one like per user per center
        manager
            .create_index(
                Index::create()
                    .name("uniq_like_user_center")
                    .table(Like::Table)
                    .col(Like::UserId)
                    .col(Like::CenterId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Reception: listed per center
        manager
            .create_index(
                Index::create()
                    .name("idx_reception_center")
                    .table(Reception::Table)
                    .col(Reception::CenterId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_otp_code_email").table(OtpCode::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_center_region").table(Center::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_branch_center").table(Branch::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_course_center").table(Course::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_comment_center").table(Comment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_like_user_center").table(Like::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_reception_center").table(Reception::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum OtpCode { Table, Email }

#[derive(DeriveIden)]
enum Center { Table, RegionId }

#[derive(DeriveIden)]
enum Branch { Table, CenterId }

#[derive(DeriveIden)]
enum Course { Table, CenterId }

#[derive(DeriveIden)]
enum Comment { Table, CenterId }

#[derive(DeriveIden)]
enum Like { Table, UserId, CenterId }

#[derive(DeriveIden)]
enum Reception { Table, CenterId }
