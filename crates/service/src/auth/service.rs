use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use tracing::{info, instrument};

use super::domain::{AuthSession, Claims, LoginInput};
use super::errors::AuthError;
use super::repository::AccountRepository;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self { jwt_secret: jwt_secret.into(), token_ttl_hours: 12 }
    }
}

/// Hash a plaintext password with argon2 and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::HashError(e.to_string()))?
        .to_string())
}

/// Auth business service independent of web framework
pub struct AuthService<R: AccountRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AccountRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Authenticate an account and issue a signed token.
    ///
    /// Lookup failure and password mismatch are indistinguishable to the
    /// caller; both surface as `Unauthorized`.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig, hash_password}, repository::mock::MockAccountRepository};
    /// use service::auth::domain::{Account, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAccountRepository::default());
    /// repo.insert(Account {
    ///     id: uuid::Uuid::new_v4(),
    ///     email: "pro@example.com".into(),
    ///     name: "Pro".into(),
    ///     role: "provider".into(),
    ///     password_hash: hash_password("Secret123").unwrap(),
    /// });
    /// let svc = AuthService::new(repo, AuthConfig::new("secret"));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "pro@example.com".into(), password: "Secret123".into() })).unwrap();
    /// assert_eq!(session.role, "provider");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let account = self
            .repo
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&account.password_hash)
            .map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }

        let exp = (chrono::Utc::now() + chrono::Duration::hours(self.cfg.token_ttl_hours)).timestamp() as usize;
        let claims = Claims {
            sub: account.email.clone(),
            uid: account.id.to_string(),
            role: account.role.clone(),
            exp,
        };
        let token = encode(
            &JwtHeader::default(),
            &claims,
            &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenError(e.to_string()))?;

        info!(account_id = %account.id, role = %account.role, "login_ok");
        Ok(AuthSession {
            account_id: account.id,
            email: account.email,
            name: account.name,
            role: account.role,
            token,
        })
    }

    /// Validate a token and return its claims.
    pub fn decode_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| AuthError::TokenError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::domain::Account;
    use crate::auth::repository::mock::MockAccountRepository;
    use uuid::Uuid;

    fn seeded_service(email: &str, password: &str) -> AuthService<MockAccountRepository> {
        let repo = MockAccountRepository::default();
        repo.insert(Account {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: "Test Account".into(),
            role: "provider".into(),
            password_hash: hash_password(password).unwrap(),
        });
        AuthService::new(Arc::new(repo), AuthConfig::new("test-secret"))
    }

    #[tokio::test]
    async fn login_issues_a_decodable_token() {
        let svc = seeded_service("pro@example.com", "Passw0rd!");
        let session = svc
            .login(LoginInput { email: "pro@example.com".into(), password: "Passw0rd!".into() })
            .await
            .unwrap();
        assert_eq!(session.role, "provider");
        let claims = svc.decode_token(&session.token).unwrap();
        assert_eq!(claims.sub, "pro@example.com");
        assert_eq!(claims.uid, session.account_id.to_string());
    }

    #[tokio::test]
    async fn mixed_case_seed_email_is_still_found() {
        let svc = seeded_service("Mixed.Case@Example.com", "Passw0rd!");
        let session = svc
            .login(LoginInput { email: "mixed.case@example.com".into(), password: "Passw0rd!".into() })
            .await
            .unwrap();
        assert_eq!(session.email, "Mixed.Case@Example.com");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_both_unauthorized() {
        let svc = seeded_service("pro@example.com", "Passw0rd!");
        let bad = svc
            .login(LoginInput { email: "pro@example.com".into(), password: "nope".into() })
            .await;
        assert!(matches!(bad, Err(AuthError::Unauthorized)));

        let missing = svc
            .login(LoginInput { email: "ghost@example.com".into(), password: "Passw0rd!".into() })
            .await;
        assert!(matches!(missing, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn token_from_another_secret_is_rejected() {
        let svc = seeded_service("pro@example.com", "Passw0rd!");
        let other = seeded_service("pro@example.com", "Passw0rd!");
        let session = svc
            .login(LoginInput { email: "pro@example.com".into(), password: "Passw0rd!".into() })
            .await
            .unwrap();
        // same secret in both mocks, so forge one with a different key
        let forged = AuthService::new(
            Arc::new(MockAccountRepository::default()),
            AuthConfig::new("other-secret"),
        );
        assert!(forged.decode_token(&session.token).is_err());
        assert!(other.decode_token(&session.token).is_ok());
    }
}
