use async_trait::async_trait;

use super::domain::Account;
use super::errors::AuthError;

/// Repository abstraction over whichever table holds the account.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAccountRepository {
        accounts: Mutex<HashMap<String, Account>>, // key: email
    }

    impl MockAccountRepository {
        pub fn insert(&self, account: Account) {
            let mut accounts = self.accounts.lock().unwrap();
            // key by lowercased email, matching the store-backed repos
            accounts.insert(account.email.to_lowercase(), account);
        }
    }

    #[async_trait]
    impl AccountRepository for MockAccountRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthError> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.get(&email.to_lowercase()).cloned())
        }
    }
}
