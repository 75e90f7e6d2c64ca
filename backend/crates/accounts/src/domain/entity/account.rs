//! Account Entity
//!
//! A registered account. The password digest stays inside the domain;
//! everything that leaves the service goes through [`PublicAccountView`].

use chrono::{DateTime, Utc};

use crate::domain::value_object::{account_id::AccountId, user_password::UserPassword};
use crate::error::AccountResult;

/// Account about to be inserted
///
/// The id is assigned here, before the store call, so a retried insert
/// of the same value can never produce a second account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub account_id: AccountId,
    /// Unique, case-sensitive
    pub username: String,
    pub fullname: Option<String>,
    pub password_hash: UserPassword,
    pub created_at: DateTime<Utc>,
}

impl NewAccount {
    pub fn new(username: String, fullname: Option<String>, password_hash: UserPassword) -> Self {
        Self {
            account_id: AccountId::new(),
            username,
            fullname,
            password_hash,
            created_at: Utc::now(),
        }
    }

    /// The persisted form of this account
    pub fn into_account(self) -> Account {
        Account {
            account_id: self.account_id,
            username: self.username,
            fullname: self.fullname,
            password_hash: self.password_hash,
            created_at: self.created_at,
        }
    }
}

/// Persisted account
#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: AccountId,
    pub username: String,
    pub fullname: Option<String>,
    pub password_hash: UserPassword,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Projection without the password digest
    pub fn public_view(&self) -> PublicAccountView {
        PublicAccountView {
            id: self.account_id,
            username: self.username.clone(),
            fullname: self.fullname.clone(),
        }
    }

    /// Check a candidate password against the stored digest
    pub fn verify_password(&self, plaintext: &str) -> AccountResult<bool> {
        self.password_hash.verify(plaintext)
    }
}

/// Outward representation of an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicAccountView {
    pub id: AccountId,
    pub username: String,
    pub fullname: Option<String>,
}

impl From<Account> for PublicAccountView {
    fn from(account: Account) -> Self {
        Self {
            id: account.account_id,
            username: account.username,
            fullname: account.fullname,
        }
    }
}
