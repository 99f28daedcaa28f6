use sea_orm::DatabaseConnection;

use crate::auth::domain::Account;
use crate::auth::errors::AuthError;
use crate::auth::repository::AccountRepository;

/// Accounts backed by the provider table. Role is always `"provider"`.
pub struct ProviderAccounts {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AccountRepository for ProviderAccounts {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthError> {
        let res = models::provider::find_by_email(&self.db, email)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|p| Account {
            id: p.id,
            email: p.email,
            name: p.name,
            role: "provider".to_string(),
            password_hash: p.password_hash,
        }))
    }
}

/// Accounts backed by the user table (admins and end-users).
pub struct UserAccounts {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AccountRepository for UserAccounts {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthError> {
        let res = models::user::find_by_email(&self.db, email)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|u| Account {
            id: u.id,
            email: u.email,
            name: u.name,
            role: u.role,
            password_hash: u.password_hash,
        }))
    }
}
