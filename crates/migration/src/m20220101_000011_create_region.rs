//! Create `region` table.
//!
//! Administrative regions that centers and branches are located in.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Region::Table)
                    .if_not_exists()
                    .col(uuid(Region::Id).primary_key())
                    .col(string_len(Region::Name, 128).unique_key().not_null())
                    .col(timestamp_with_time_zone(Region::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Region::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Region { Table, Id, Name, CreatedAt }
