//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::account::{Account, NewAccount};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{account_id::AccountId, user_password::UserPassword};
use crate::error::{AccountError, AccountResult};

/// Unique constraint on `accounts.username`
const USERNAME_CONSTRAINT: &str = "accounts_username_key";

/// PostgreSQL-backed account repository
///
/// Relies on the unique index on `accounts.username`.
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AccountRepository for PgAccountRepository {
    async fn create(&self, account: &NewAccount) -> AccountResult<Account> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                username,
                fullname,
                password_hash,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(&account.username)
        .bind(&account.fullname)
        .bind(account.password_hash.as_digest())
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        // Committed: the inserted values are the account
        Ok(account.clone().into_account())
    }

    async fn find_by_username(&self, username: &str) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                username,
                fullname,
                password_hash,
                created_at
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }
}

/// Translate a username unique violation into the domain conflict
fn map_insert_error(err: sqlx::Error) -> AccountError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() && db_err.constraint() == Some(USERNAME_CONSTRAINT) {
            return AccountError::UsernameTaken;
        }
    }
    AccountError::Database(err)
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    username: String,
    fullname: Option<String>,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AccountResult<Account> {
        let password_hash = UserPassword::from_digest(self.password_hash).map_err(|_| {
            AccountError::Internal(format!(
                "Invalid password hash stored for account {}",
                self.account_id
            ))
        })?;

        Ok(Account {
            account_id: AccountId::from_uuid(self.account_id),
            username: self.username,
            fullname: self.fullname,
            password_hash,
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct ConstraintViolation {
        unique: bool,
        constraint: Option<&'static str>,
    }

    impl fmt::Display for ConstraintViolation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "violates constraint {:?}", self.constraint)
        }
    }

    impl StdError for ConstraintViolation {}

    impl DatabaseError for ConstraintViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            if self.unique {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::Other
            }
        }
    }

    fn db_error(unique: bool, constraint: Option<&'static str>) -> sqlx::Error {
        sqlx::Error::Database(Box::new(ConstraintViolation { unique, constraint }))
    }

    #[test]
    fn test_username_violation_is_conflict() {
        let err = map_insert_error(db_error(true, Some(USERNAME_CONSTRAINT)));
        assert!(matches!(err, AccountError::UsernameTaken));
    }

    #[test]
    fn test_primary_key_violation_is_database_error() {
        let err = map_insert_error(db_error(true, Some("accounts_pkey")));
        assert!(matches!(err, AccountError::Database(_)));
        assert!(err.kind().is_server_error());
    }

    #[test]
    fn test_other_failures_are_database_errors() {
        let err = map_insert_error(db_error(false, Some(USERNAME_CONSTRAINT)));
        assert!(matches!(err, AccountError::Database(_)));

        let err = map_insert_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AccountError::Database(_)));
    }
}
