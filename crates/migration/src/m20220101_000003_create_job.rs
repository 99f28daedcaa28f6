//! Create `job` table with FK to `provider`.
//!
//! A job is one unit of requested work; its status drives the provider
//! counters and the transaction ledger.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Job::Table)
                    .if_not_exists()
                    .col(uuid(Job::Id).primary_key())
                    .col(uuid(Job::ProviderId).not_null())
                    .col(string_len(Job::CustomerName, 128).not_null())
                    .col(string_len(Job::ServiceType, 128).not_null())
                    .col(ColumnDef::new(Job::Description).text().null())
                    .col(string_len(Job::Status, 16).not_null())
                    .col(ColumnDef::new(Job::Amount).double().null())
                    .col(ColumnDef::new(Job::Date).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Job::Time).string_len(16).null())
                    .col(timestamp_with_time_zone(Job::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Job::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_provider")
                            .from(Job::Table, Job::ProviderId)
                            .to(Provider::Table, Provider::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Job::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Job {
    Table,
    Id,
    ProviderId,
    CustomerName,
    ServiceType,
    Description,
    Status,
    Amount,
    Date,
    Time,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Provider { Table, Id }
