use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use models::service_offering::{self, AVAILABILITY_AVAILABLE};

use crate::errors::ServiceError;

#[derive(Debug, Clone, Default)]
pub struct UpdateOffering {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub availability: Option<String>,
}

pub async fn list_by_provider(
    db: &DatabaseConnection,
    provider_id: Uuid,
) -> Result<Vec<service_offering::Model>, ServiceError> {
    service_offering::Entity::find()
        .filter(service_offering::Column::ProviderId.eq(provider_id))
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn create_offering(
    db: &DatabaseConnection,
    provider_id: Uuid,
    name: &str,
    description: Option<String>,
    price: f64,
    availability: Option<String>,
) -> Result<service_offering::Model, ServiceError> {
    let exists = models::provider::Entity::find_by_id(provider_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if exists.is_none() {
        return Err(ServiceError::not_found("provider"));
    }
    let availability = availability.unwrap_or_else(|| AVAILABILITY_AVAILABLE.to_string());
    let created = service_offering::create(db, provider_id, name, description, price, &availability).await?;
    Ok(created)
}

pub async fn update_offering(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateOffering,
) -> Result<(), ServiceError> {
    if let Some(a) = &input.availability {
        service_offering::validate_availability(a)?;
    }
    if let Some(p) = input.price {
        if p < 0.0 {
            return Err(ServiceError::Validation("price must be >= 0".into()));
        }
    }
    let found = service_offering::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("service"))?;
    let mut am: service_offering::ActiveModel = found.into();
    if let Some(v) = input.name { am.name = Set(v); }
    if let Some(v) = input.description { am.description = Set(Some(v)); }
    if let Some(v) = input.price { am.price = Set(v); }
    if let Some(v) = input.availability { am.availability = Set(v); }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

pub async fn delete_offering(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = service_offering::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("service"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use models::provider::{self, NewProvider};

    #[tokio::test]
    async fn offering_crud_roundtrip() -> anyhow::Result<()> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let p = provider::create(
            &db,
            NewProvider {
                name: "Offerings Test".into(),
                email: format!("off_{}@example.com", Uuid::new_v4()),
                phone: "555-0400".into(),
                password_hash: "x".into(),
                service_type: "appliance".into(),
                experience: 2,
                experience_unit: "years".into(),
                license_image: None,
                profile_image: None,
            },
        )
        .await?;

        let o = create_offering(&db, p.id, "Plumbing Repair", Some("Fix leaks and clogs".into()), 75.0, None).await?;
        assert_eq!(o.availability, "available");

        update_offering(
            &db,
            o.id,
            UpdateOffering { price: Some(90.0), availability: Some("unavailable".into()), ..Default::default() },
        )
        .await?;
        let listed = list_by_provider(&db, p.id).await?;
        assert_eq!(listed.len(), 1);
        assert!((listed[0].price - 90.0).abs() < f64::EPSILON);
        assert_eq!(listed[0].availability, "unavailable");

        delete_offering(&db, o.id).await?;
        let missing = delete_offering(&db, o.id).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn negative_price_is_rejected() -> anyhow::Result<()> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let res = update_offering(&db, Uuid::new_v4(), UpdateOffering { price: Some(-1.0), ..Default::default() }).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        Ok(())
    }
}
