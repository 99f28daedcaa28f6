//! Create `provider` table.
//!
//! Holds provider identity plus the running job/earnings counters that the
//! job transition engine maintains.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Provider::Table)
                    .if_not_exists()
                    .col(uuid(Provider::Id).primary_key())
                    .col(string_len(Provider::Name, 128).not_null())
                    .col(string_len(Provider::Email, 255).unique_key().not_null())
                    .col(string_len(Provider::Phone, 32).not_null())
                    .col(string_len(Provider::PasswordHash, 255).not_null())
                    .col(string_len(Provider::ServiceType, 32).not_null())
                    .col(integer(Provider::Experience).not_null())
                    .col(string_len(Provider::ExperienceUnit, 16).not_null())
                    .col(ColumnDef::new(Provider::LicenseImage).string_len(255).null())
                    .col(ColumnDef::new(Provider::ProfileImage).string_len(255).null())
                    .col(double(Provider::Rating).not_null().default(0.0))
                    .col(integer(Provider::TotalJobs).not_null().default(0))
                    .col(integer(Provider::PendingJobs).not_null().default(0))
                    .col(integer(Provider::CompletedJobs).not_null().default(0))
                    .col(double(Provider::TotalEarnings).not_null().default(0.0))
                    .col(timestamp_with_time_zone(Provider::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Provider::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Provider::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Provider {
    Table,
    Id,
    Name,
    Email,
    Phone,
    PasswordHash,
    ServiceType,
    Experience,
    ExperienceUnit,
    LicenseImage,
    ProfileImage,
    Rating,
    TotalJobs,
    PendingJobs,
    CompletedJobs,
    TotalEarnings,
    CreatedAt,
    UpdatedAt,
}
