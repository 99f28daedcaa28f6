use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::info;
use uuid::Uuid;

use models::user;

use crate::auth::service::hash_password;
use crate::errors::ServiceError;

/// Create a portal account (admin or end-user), hashing the password first.
pub async fn register_user(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> Result<user::Model, ServiceError> {
    if password.len() < 8 {
        return Err(ServiceError::Validation("password too short (>=8)".into()));
    }
    if user::find_by_email(db, email).await?.is_some() {
        return Err(ServiceError::Conflict("email already registered".into()));
    }
    let hash = hash_password(password).map_err(|e| ServiceError::Validation(e.to_string()))?;
    let created = user::create(db, name, email, &hash, role).await?;
    info!(user_id = %created.id, role = %created.role, "user_registered");
    Ok(created)
}

pub async fn get_user(db: &DatabaseConnection, id: Uuid) -> Result<Option<user::Model>, ServiceError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}
