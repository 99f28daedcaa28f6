use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// An authenticatable account, independent of which table it lives in.
/// Providers carry the fixed role `"provider"`; portal users carry the
/// role stored on their row (`"admin"` or `"user"`).
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Login result (session)
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub account_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub token: String,
}

/// Token payload; `sub` is the email, `uid` the account id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub uid: String,
    pub role: String,
    pub exp: usize,
}
