//! Create `branch` table with FKs to `center` and `region`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Branch::Table)
                    .if_not_exists()
                    .col(uuid(Branch::Id).primary_key())
                    .col(string_len(Branch::Name, 255).not_null())
                    .col(string_len(Branch::Phone, 32).not_null())
                    .col(string_len(Branch::Address, 512).not_null())
                    .col(ColumnDef::new(Branch::Image).string_len(512).null())
                    .col(uuid(Branch::RegionId).not_null())
                    .col(uuid(Branch::CenterId).not_null())
                    .col(timestamp_with_time_zone(Branch::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Branch::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_branch_region")
                            .from(Branch::Table, Branch::RegionId)
                            .to(Region::Table, Region::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_branch_center")
                            .from(Branch::Table, Branch::CenterId)
                            .to(Center::Table, Center::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Branch::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Branch { Table, Id, Name, Phone, Address, Image, RegionId, CenterId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Region { Table, Id }

#[derive(DeriveIden)]
enum Center { Table, Id }
