use sea_orm::{entity::prelude::*, DatabaseConnection, QueryFilter, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

/// Service categories a provider can register under.
pub const SERVICE_TYPES: [&str; 5] = ["plumbing", "electrical", "carpentry", "appliance", "cleaning"];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "provider")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub service_type: String,
    pub experience: i32,
    pub experience_unit: String,
    pub license_image: Option<String>,
    pub profile_image: Option<String>,
    pub rating: f64,
    pub total_jobs: i32,
    pub pending_jobs: i32,
    pub completed_jobs: i32,
    pub total_earnings: f64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields required to register a provider. Images are optional file names
/// written by the (external) upload path.
#[derive(Debug, Clone)]
pub struct NewProvider {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub service_type: String,
    pub experience: i32,
    pub experience_unit: String,
    pub license_image: Option<String>,
    pub profile_image: Option<String>,
}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    if !email.contains('@') {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    Ok(())
}

pub fn validate_service_type(service_type: &str) -> Result<(), errors::ModelError> {
    if !SERVICE_TYPES.contains(&service_type) {
        return Err(errors::ModelError::Validation(format!(
            "unknown service_type: {service_type}"
        )));
    }
    Ok(())
}

pub fn validate_experience_unit(unit: &str) -> Result<(), errors::ModelError> {
    if unit != "months" && unit != "years" {
        return Err(errors::ModelError::Validation("experience_unit must be months or years".into()));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, input: NewProvider) -> Result<Model, errors::ModelError> {
    validate_name(&input.name)?;
    validate_email(&input.email)?;
    validate_service_type(&input.service_type)?;
    validate_experience_unit(&input.experience_unit)?;
    if input.experience < 0 {
        return Err(errors::ModelError::Validation("experience must be >= 0".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        email: Set(input.email.to_lowercase()),
        phone: Set(input.phone),
        password_hash: Set(input.password_hash),
        service_type: Set(input.service_type),
        experience: Set(input.experience),
        experience_unit: Set(input.experience_unit),
        license_image: Set(input.license_image),
        profile_image: Set(input.profile_image),
        rating: Set(0.0),
        total_jobs: Set(0),
        pending_jobs: Set(0),
        completed_jobs: Set(0),
        total_earnings: Set(0.0),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Email.eq(email.to_lowercase()))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
