//! Create `center` table with FKs to `region` and `user` (owner).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Center::Table)
                    .if_not_exists()
                    .col(uuid(Center::Id).primary_key())
                    .col(string_len(Center::Name, 255).not_null())
                    .col(string_len(Center::Phone, 32).not_null())
                    .col(string_len(Center::Address, 512).not_null())
                    .col(ColumnDef::new(Center::Image).string_len(512).null())
                    .col(uuid(Center::RegionId).not_null())
                    .col(uuid(Center::OwnerId).not_null())
                    .col(timestamp_with_time_zone(Center::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Center::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_center_region")
                            .from(Center::Table, Center::RegionId)
                            .to(Region::Table, Region::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_center_owner")
                            .from(Center::Table, Center::OwnerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Center::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Center { Table, Id, Name, Phone, Address, Image, RegionId, OwnerId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Region { Table, Id }

#[derive(DeriveIden)]
enum User { Table, Id }
