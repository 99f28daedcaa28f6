use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors;
use crate::provider;

/// Job lifecycle states. Stored as plain strings; any state is reachable
/// from any other (the engine applies side effects keyed on the new state
/// only).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::InProgress => "in progress",
            JobStatus::Completed => "completed",
            JobStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for JobStatus {
    type Err = errors::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobStatus::Pending),
            "in progress" => Ok(JobStatus::InProgress),
            "completed" => Ok(JobStatus::Completed),
            "cancelled" => Ok(JobStatus::Cancelled),
            other => Err(errors::ModelError::Validation(format!("unknown job status: {other}"))),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub provider_id: Uuid,
    pub customer_name: String,
    pub service_type: String,
    pub description: Option<String>,
    pub status: String,
    pub amount: Option<f64>,
    pub date: Option<DateTimeWithTimeZone>,
    pub time: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
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

#[derive(Debug, Clone)]
pub struct NewJob {
    pub provider_id: Uuid,
    pub customer_name: String,
    pub service_type: String,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<DateTimeWithTimeZone>,
    pub time: Option<String>,
}

/// Insert a job in `pending` state (the lifecycle's initial state).
pub async fn create(db: &DatabaseConnection, input: NewJob) -> Result<Model, errors::ModelError> {
    if input.customer_name.trim().is_empty() {
        return Err(errors::ModelError::Validation("customer_name required".into()));
    }
    if input.service_type.trim().is_empty() {
        return Err(errors::ModelError::Validation("service_type required".into()));
    }
    if let Some(a) = input.amount {
        if a < 0.0 {
            return Err(errors::ModelError::Validation("amount must be >= 0".into()));
        }
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        provider_id: Set(input.provider_id),
        customer_name: Set(input.customer_name),
        service_type: Set(input.service_type),
        description: Set(input.description),
        status: Set(JobStatus::Pending.as_str().to_string()),
        amount: Set(input.amount),
        date: Set(input.date),
        time: Set(input.time),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
