//! Create `like` table with FKs to `user` and `center`.
//!
//! Uniqueness of (user_id, center_id) is enforced by the index migration.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Like::Table)
                    .if_not_exists()
                    .col(uuid(Like::Id).primary_key())
                    .col(uuid(Like::UserId).not_null())
                    .col(uuid(Like::CenterId).not_null())
                    .col(timestamp_with_time_zone(Like::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_like_user")
                            .from(Like::Table, Like::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_like_center")
                            .from(Like::Table, Like::CenterId)
                            .to(Center::Table, Center::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Like::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Like { Table, Id, UserId, CenterId, CreatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum Center { Table, Id }
