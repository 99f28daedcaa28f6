//! Create `transaction` table with FK to `provider`.
//!
//! Append-only earnings ledger; rows are inserted when a job completes with
//! an amount and are never updated or deleted.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transaction::Table)
                    .if_not_exists()
                    .col(uuid(Transaction::Id).primary_key())
                    .col(uuid(Transaction::ProviderId).not_null())
                    .col(string_len(Transaction::Service, 128).not_null())
                    .col(string_len(Transaction::CustomerName, 128).not_null())
                    .col(double(Transaction::Amount).not_null())
                    .col(timestamp_with_time_zone(Transaction::Date).not_null())
                    .col(timestamp_with_time_zone(Transaction::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_provider")
                            .from(Transaction::Table, Transaction::ProviderId)
                            .to(Provider::Table, Provider::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Transaction::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Transaction { Table, Id, ProviderId, Service, CustomerName, Amount, Date, CreatedAt }

#[derive(DeriveIden)]
enum Provider { Table, Id }
