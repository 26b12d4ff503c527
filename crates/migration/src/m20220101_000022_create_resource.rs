//! Create `resource` table with FK to `user` (uploader).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Resource::Table)
                    .if_not_exists()
                    .col(uuid(Resource::Id).primary_key())
                    .col(uuid(Resource::UserId).not_null())
                    .col(string_len(Resource::Name, 255).not_null())
                    .col(ColumnDef::new(Resource::Description).text().null())
                    .col(string_len(Resource::Media, 512).not_null())
                    .col(ColumnDef::new(Resource::Image).string_len(512).null())
                    .col(string_len(Resource::Category, 64).not_null())
                    .col(timestamp_with_time_zone(Resource::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Resource::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resource_user")
                            .from(Resource::Table, Resource::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Resource::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Resource { Table, Id, UserId, Name, Description, Media, Image, Category, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }
