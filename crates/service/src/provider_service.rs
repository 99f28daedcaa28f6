use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::info;
use uuid::Uuid;

use models::provider::{self, NewProvider};

use crate::auth::service::hash_password;
use crate::errors::ServiceError;

/// Registration payload; the password arrives in the clear and is hashed
/// here before it touches the store.
#[derive(Debug, Clone)]
pub struct RegisterProvider {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub service_type: String,
    pub experience: i32,
    pub experience_unit: String,
    pub license_image: Option<String>,
    pub profile_image: Option<String>,
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub service_type: Option<String>,
    pub experience: Option<i32>,
}

impl UpdateProfile {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.service_type.is_none()
            && self.experience.is_none()
    }
}

pub async fn register(db: &DatabaseConnection, input: RegisterProvider) -> Result<provider::Model, ServiceError> {
    if input.password.len() < 8 {
        return Err(ServiceError::Validation("password too short (>=8)".into()));
    }
    if provider::find_by_email(db, &input.email).await?.is_some() {
        return Err(ServiceError::Conflict("email already registered".into()));
    }
    let password_hash = hash_password(&input.password)
        .map_err(|e| ServiceError::Validation(e.to_string()))?;
    let created = provider::create(
        db,
        NewProvider {
            name: input.name,
            email: input.email,
            phone: input.phone,
            password_hash,
            service_type: input.service_type,
            experience: input.experience,
            experience_unit: input.experience_unit,
            license_image: input.license_image,
            profile_image: input.profile_image,
        },
    )
    .await?;
    info!(provider_id = %created.id, email = %created.email, "provider_registered");
    Ok(created)
}

pub async fn get_profile(db: &DatabaseConnection, id: Uuid) -> Result<Option<provider::Model>, ServiceError> {
    provider::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn update_profile(db: &DatabaseConnection, id: Uuid, input: UpdateProfile) -> Result<(), ServiceError> {
    if input.is_empty() {
        return Err(ServiceError::Validation("no fields to update".into()));
    }
    if let Some(email) = &input.email {
        provider::validate_email(email)?;
        // email must not belong to another provider
        let taken = provider::Entity::find()
            .filter(provider::Column::Email.eq(email.to_lowercase()))
            .filter(provider::Column::Id.ne(id))
            .one(db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        if taken.is_some() {
            return Err(ServiceError::Conflict("email already in use".into()));
        }
    }
    if let Some(st) = &input.service_type {
        provider::validate_service_type(st)?;
    }

    let found = provider::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("provider"))?;
    let mut am: provider::ActiveModel = found.into();
    if let Some(v) = input.name { am.name = Set(v); }
    if let Some(v) = input.email { am.email = Set(v.to_lowercase()); }
    if let Some(v) = input.phone { am.phone = Set(v); }
    if let Some(v) = input.service_type { am.service_type = Set(v); }
    if let Some(v) = input.experience { am.experience = Set(v); }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}
