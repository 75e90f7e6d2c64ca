//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::application::register::RegistrationService;
use crate::domain::repository::AccountRepository;
use crate::error::AccountResult;
use crate::presentation::dto::{AccountResponse, RegisterRequest};

/// Shared state for account handlers
#[derive(Clone)]
pub struct AccountsAppState<R>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AccountsConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/users
pub async fn register<R>(
    State(state): State<AccountsAppState<R>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AccountResult<impl IntoResponse>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let service = RegistrationService::new(state.repo.clone(), state.config.clone());
    let view = service.register(req.into()).await?;

    let location = state.config.location_of(view.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(AccountResponse::from(view)),
    ))
}
