//! Create `course` table with FKs to `center`, `subject`, `field`.
//!
//! Price is stored in minor currency units.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    .col(uuid(Course::Id).primary_key())
                    .col(uuid(Course::CenterId).not_null())
                    .col(ColumnDef::new(Course::SubjectId).uuid().null())
                    .col(ColumnDef::new(Course::FieldId).uuid().null())
                    .col(string_len(Course::Name, 255).not_null())
                    .col(ColumnDef::new(Course::Description).text().null())
                    .col(big_integer(Course::Price).not_null())
                    .col(integer(Course::DurationWeeks).not_null())
                    .col(timestamp_with_time_zone(Course::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Course::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_center")
                            .from(Course::Table, Course::CenterId)
                            .to(Center::Table, Center::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_subject")
                            .from(Course::Table, Course::SubjectId)
                            .to(Subject::Table, Subject::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_field")
                            .from(Course::Table, Course::FieldId)
                            .to(Field::Table, Field::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Course::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Course { Table, Id, CenterId, SubjectId, FieldId, Name, Description, Price, DurationWeeks, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Center { Table, Id }

#[derive(DeriveIden)]
enum Subject { Table, Id }

#[derive(DeriveIden)]
enum Field { Table, Id }
