//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20220101_000011_create_region;
mod m20220101_000012_create_user;
mod m20220101_000013_create_user_credentials;
mod m20220101_000014_create_otp_code;
mod m20220101_000015_create_subject;
mod m20220101_000016_create_field;
mod m20220101_000017_create_center;
mod m20220101_000018_create_branch;
mod m20220101_000019_create_course;
mod m20220101_000020_create_comment;
mod m20220101_000021_create_like;
mod m20220101_000022_create_resource;
mod m20220101_000023_create_reception;
mod m20220101_000002_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20220101_000011_create_region::Migration),
            Box::new(m20220101_000012_create_user::Migration),
            Box::new(m20220101_000013_create_user_credentials::Migration),
            Box::new(m20220101_000014_create_otp_code::Migration),
            Box::new(m20220101_000015_create_subject::Migration),
            Box::new(m20220101_000016_create_field::Migration),
            Box::new(m20220101_000017_create_center::Migration),
            Box::new(m20220101_000018_create_branch::Migration),
            Box::new(m20220101_000019_create_course::Migration),
            Box::new(m20220101_000020_create_comment::Migration),
            Box::new(m20220101_000021_create_like::Migration),
            Box::new(m20220101_000022_create_resource::Migration),
            Box::new(m20220101_000023_create_reception::Migration),
            // Indexes should always be applied last
            Box::new(m20220101_000002_add_indexes::Migration),
        ]
    }
}
