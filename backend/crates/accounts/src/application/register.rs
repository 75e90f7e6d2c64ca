//! Registration Use Case
//!
//! Creates a new account: validate → hash → insert.

use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::domain::entity::account::{NewAccount, PublicAccountView};
use crate::domain::repository::AccountRepository;
use crate::domain::validation::{RegistrationRequest, validate};
use crate::domain::value_object::user_password::UserPassword;
use crate::error::AccountResult;

/// Registration service
///
/// Outcomes:
/// - `Ok(view)`: account created
/// - `Err(AccountError::Validation)`: rejected, nothing hashed or written
/// - `Err(AccountError::UsernameTaken)`: conflict reported by the store
/// - any other error: internal failure
pub struct RegistrationService<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AccountsConfig>,
}

impl<R> RegistrationService<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountsConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn register(&self, request: RegistrationRequest) -> AccountResult<PublicAccountView> {
        let normalized = validate(&request)?;

        let password_hash = UserPassword::hash(normalized.password, self.config.hash_cost).await?;

        // The store owns uniqueness; no existence pre-check here
        let new_account = NewAccount::new(normalized.username, normalized.fullname, password_hash);
        let account = self.repo.create(&new_account).await?;

        tracing::info!(
            account_id = %account.account_id,
            username = %account.username,
            "Account registered"
        );

        Ok(account.public_view())
    }
}
