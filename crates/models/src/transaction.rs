use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;
use crate::provider;

/// Append-only ledger entry. Rows are only ever inserted, by the job
/// transition engine when a job completes with an amount.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transaction")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub provider_id: Uuid,
    pub service: String,
    pub customer_name: String,
    pub amount: f64,
    pub date: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Provider,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Provider => Entity::belongs_to(provider::Entity)
                .from(Column::ProviderId)
                .to(provider::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Build (without inserting) a ledger entry dated now. The engine inserts it
/// inside the same database transaction as the job/provider writes.
pub fn new_entry(provider_id: Uuid, service: &str, customer_name: &str, amount: f64) -> ActiveModel {
    let now: DateTimeWithTimeZone = Utc::now().into();
    ActiveModel {
        id: Set(Uuid::new_v4()),
        provider_id: Set(provider_id),
        service: Set(service.to_string()),
        customer_name: Set(customer_name.to_string()),
        amount: Set(amount),
        date: Set(now),
        created_at: Set(now),
    }
}

pub async fn create(
    db: &DatabaseConnection,
    provider_id: Uuid,
    service: &str,
    customer_name: &str,
    amount: f64,
    date: DateTimeWithTimeZone,
) -> Result<Model, errors::ModelError> {
    if amount < 0.0 {
        return Err(errors::ModelError::Validation("amount must be >= 0".into()));
    }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        provider_id: Set(provider_id),
        service: Set(service.to_string()),
        customer_name: Set(customer_name.to_string()),
        amount: Set(amount),
        date: Set(date),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
