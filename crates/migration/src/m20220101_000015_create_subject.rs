//! Create `subject` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subject::Table)
                    .if_not_exists()
                    .col(uuid(Subject::Id).primary_key())
                    .col(string_len(Subject::Name, 128).unique_key().not_null())
                    .col(ColumnDef::new(Subject::Image).string_len(512).null())
                    .col(timestamp_with_time_zone(Subject::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Subject::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Subject { Table, Id, Name, Image, CreatedAt }
