use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;
use crate::provider;

pub const AVAILABILITY_AVAILABLE: &str = "available";
pub const AVAILABILITY_UNAVAILABLE: &str = "unavailable";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_offering")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub provider_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub availability: String,
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

pub fn validate_availability(value: &str) -> Result<(), errors::ModelError> {
    if value != AVAILABILITY_AVAILABLE && value != AVAILABILITY_UNAVAILABLE {
        return Err(errors::ModelError::Validation(format!("unknown availability: {value}")));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    provider_id: Uuid,
    name: &str,
    description: Option<String>,
    price: f64,
    availability: &str,
) -> Result<Model, errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    if price < 0.0 {
        return Err(errors::ModelError::Validation("price must be >= 0".into()));
    }
    validate_availability(availability)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        provider_id: Set(provider_id),
        name: Set(name.to_string()),
        description: Set(description),
        price: Set(price),
        availability: Set(availability.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
