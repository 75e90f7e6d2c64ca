//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infrastructure layer.

use crate::domain::entity::account::{Account, NewAccount};
use crate::error::AccountResult;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert a new account
    ///
    /// Username uniqueness is checked by the insert itself, atomically.
    /// A collision yields `AccountError::UsernameTaken`; nothing is written.
    async fn create(&self, account: &NewAccount) -> AccountResult<Account>;

    /// Find account by username (exact, case-sensitive match)
    async fn find_by_username(&self, username: &str) -> AccountResult<Option<Account>>;
}
