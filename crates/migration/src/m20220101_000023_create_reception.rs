//! Create `reception` table with FKs to `user`, `center` and `field`.
//!
//! A reception is a scheduled visit of a user to a center.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reception::Table)
                    .if_not_exists()
                    .col(uuid(Reception::Id).primary_key())
                    .col(uuid(Reception::UserId).not_null())
                    .col(uuid(Reception::CenterId).not_null())
                    .col(ColumnDef::new(Reception::FieldId).uuid().null())
                    .col(timestamp_with_time_zone(Reception::VisitDate).not_null())
                    .col(string_len(Reception::Status, 32).not_null())
                    .col(timestamp_with_time_zone(Reception::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Reception::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reception_user")
                            .from(Reception::Table, Reception::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reception_center")
                            .from(Reception::Table, Reception::CenterId)
                            .to(Center::Table, Center::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reception_field")
                            .from(Reception::Table, Reception::FieldId)
                            .to(Field::Table, Field::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Reception::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Reception { Table, Id, UserId, CenterId, FieldId, VisitDate, Status, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum Center { Table, Id }

#[derive(DeriveIden)]
enum Field { Table, Id }
