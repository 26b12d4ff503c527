//! Create `field` table (study directions, e.g. frontend, SAT prep).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Field::Table)
                    .if_not_exists()
                    .col(uuid(Field::Id).primary_key())
                    .col(string_len(Field::Name, 128).unique_key().not_null())
                    .col(ColumnDef::new(Field::Image).string_len(512).null())
                    .col(timestamp_with_time_zone(Field::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Field::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Field { Table, Id, Name, Image, CreatedAt }
