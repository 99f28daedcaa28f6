//! Secondary indexes mirroring the query paths: jobs by provider/status/date,
//! transactions by provider and date (newest first), offerings by provider.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_job_provider")
                    .table(Job::Table)
                    .col(Job::ProviderId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_job_status")
                    .table(Job::Table)
                    .col(Job::Status)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_job_date")
                    .table(Job::Table)
                    .col(Job::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transaction_provider")
                    .table(Transaction::Table)
                    .col(Transaction::ProviderId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_transaction_date")
                    .table(Transaction::Table)
                    .col((Transaction::Date, IndexOrder::Desc))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_service_offering_provider")
                    .table(ServiceOffering::Table)
                    .col(ServiceOffering::ProviderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_provider_service_type")
                    .table(Provider::Table)
                    .col(Provider::ServiceType)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_job_provider").table(Job::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_job_status").table(Job::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_job_date").table(Job::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_transaction_provider").table(Transaction::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_transaction_date").table(Transaction::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_offering_provider").table(ServiceOffering::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_provider_service_type").table(Provider::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Job { Table, ProviderId, Status, Date }

#[derive(DeriveIden)]
enum Transaction { Table, ProviderId, Date }

#[derive(DeriveIden)]
enum ServiceOffering { Table, ProviderId }

#[derive(DeriveIden)]
enum Provider { Table, ServiceType }
