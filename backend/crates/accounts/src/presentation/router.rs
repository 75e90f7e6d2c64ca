//! Accounts Router

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::domain::repository::AccountRepository;
use crate::infra::postgres::PgAccountRepository;
use crate::presentation::handlers::{self, AccountsAppState};

/// Create the Accounts router with PostgreSQL repository
///
/// Mount it at `config.resource_path`.
pub fn accounts_router(repo: PgAccountRepository, config: AccountsConfig) -> Router {
    accounts_router_generic(repo, config)
}

/// Create a generic Accounts router for any repository implementation
pub fn accounts_router_generic<R>(repo: R, config: AccountsConfig) -> Router
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let state = AccountsAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/", post(handlers::register::<R>))
        .with_state(state)
}
