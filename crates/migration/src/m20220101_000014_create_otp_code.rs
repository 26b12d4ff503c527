//! Create `otp_code` table.
//!
//! One-time codes for email verification; matched by email, not by FK, so
//! codes can be issued before the account is usable.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OtpCode::Table)
                    .if_not_exists()
                    .col(uuid(OtpCode::Id).primary_key())
                    .col(string_len(OtpCode::Email, 255).not_null())
                    .col(string_len(OtpCode::Code, 8).not_null())
                    .col(timestamp_with_time_zone(OtpCode::ExpiresAt).not_null())
                    .col(boolean(OtpCode::Consumed).not_null())
                    .col(timestamp_with_time_zone(OtpCode::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(OtpCode::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum OtpCode { Table, Id, Email, Code, ExpiresAt, Consumed, CreatedAt }
