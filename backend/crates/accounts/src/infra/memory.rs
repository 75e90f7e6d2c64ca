//! In-Memory Repository Implementation
//!
//! Used by tests and by the API binary when no database is configured.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::entity::account::{Account, NewAccount};
use crate::domain::repository::AccountRepository;
use crate::error::{AccountError, AccountResult};

/// Account store keyed by username
///
/// Check-and-insert runs under a single lock, which gives the same
/// guarantee as a unique index. Clones share the same map.
#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<Mutex<HashMap<String, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: &NewAccount) -> AccountResult<Account> {
        let mut accounts = self.accounts.lock().await;

        match accounts.entry(account.username.clone()) {
            Entry::Occupied(_) => Err(AccountError::UsernameTaken),
            Entry::Vacant(slot) => {
                let stored = slot.insert(account.clone().into_account());
                Ok(stored.clone())
            }
        }
    }

    async fn find_by_username(&self, username: &str) -> AccountResult<Option<Account>> {
        Ok(self.accounts.lock().await.get(username).cloned())
    }
}
