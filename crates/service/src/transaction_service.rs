use chrono::{Duration, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use models::transaction;

use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Trailing-window filter for ledger listings. Anything unrecognized falls
/// back to `All`, matching the original endpoint's behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFilter {
    #[default]
    All,
    Week,
    Month,
    Quarter,
}

impl TimeFilter {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("week") => TimeFilter::Week,
            Some("month") => TimeFilter::Month,
            Some("quarter") => TimeFilter::Quarter,
            _ => TimeFilter::All,
        }
    }

    fn since(self) -> Option<chrono::DateTime<Utc>> {
        let now = Utc::now();
        match self {
            TimeFilter::All => None,
            TimeFilter::Week => Some(now - Duration::days(7)),
            TimeFilter::Month => Some(now - Duration::days(30)),
            TimeFilter::Quarter => Some(now - Duration::days(90)),
        }
    }
}

/// List a provider's ledger entries, newest first.
pub async fn list_by_provider(
    db: &DatabaseConnection,
    provider_id: Uuid,
    filter: TimeFilter,
) -> Result<Vec<transaction::Model>, ServiceError> {
    let mut query = transaction::Entity::find().filter(transaction::Column::ProviderId.eq(provider_id));
    if let Some(since) = filter.since() {
        query = query.filter(transaction::Column::Date.gte(since));
    }
    query
        .order_by_desc(transaction::Column::Date)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Paginated variant of the ledger listing.
pub async fn list_by_provider_paginated(
    db: &DatabaseConnection,
    provider_id: Uuid,
    filter: TimeFilter,
    opts: Pagination,
) -> Result<Vec<transaction::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let mut query = transaction::Entity::find().filter(transaction::Column::ProviderId.eq(provider_id));
    if let Some(since) = filter.since() {
        query = query.filter(transaction::Column::Date.gte(since));
    }
    query
        .order_by_desc(transaction::Column::Date)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}
