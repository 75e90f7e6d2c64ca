//! Account Error Types
//!
//! This module provides account-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use thiserror::Error;

use crate::domain::validation::ValidationError;

/// Message returned for a duplicate username
pub const USERNAME_TAKEN_MESSAGE: &str = "The username already exists";

/// Message returned for every server-side failure
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    /// Registration request failed structural validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Username collides with an existing account
    #[error("The username already exists")]
    UsernameTaken,

    /// Request body could not be read as a JSON object
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Password hashing or digest parsing failed
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordHashError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::Validation(_) => ErrorKind::UnprocessableEntity,
            AccountError::UsernameTaken | AccountError::MalformedBody(_) => ErrorKind::BadRequest,
            AccountError::PasswordHash(_)
            | AccountError::Database(_)
            | AccountError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures are reported generically; their details only
    /// reach the log.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AccountError::Validation(e) => AppError::unprocessable(e.to_string()),
            AccountError::UsernameTaken => AppError::bad_request(USERNAME_TAKEN_MESSAGE)
                .with_action("Please choose a different username"),
            AccountError::MalformedBody(_) => AppError::bad_request(self.to_string())
                .with_action("Send a JSON object with username and password"),
            AccountError::PasswordHash(_)
            | AccountError::Database(_)
            | AccountError::Internal(_) => AppError::internal(INTERNAL_ERROR_MESSAGE),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::PasswordHash(e) => {
                tracing::error!(error = %e, "Account password hashing error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::UsernameTaken => {
                tracing::warn!("Registration rejected: username already exists");
            }
            _ => {
                tracing::debug!(error = %self, "Registration rejected");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for AccountError {
    fn from(rejection: JsonRejection) -> Self {
        AccountError::MalformedBody(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::Field;

    #[test]
    fn test_validation_maps_to_unprocessable() {
        let err = AccountError::from(ValidationError::MissingField {
            field: Field::Username,
        });
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            err.to_app_error().message(),
            "Missing 'username' in request body"
        );
    }

    #[test]
    fn test_username_taken_message() {
        let err = AccountError::UsernameTaken;
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.to_app_error().message(), USERNAME_TAKEN_MESSAGE);
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let err = AccountError::Internal("connection reset by peer".to_string());
        let app_error = err.to_app_error();
        assert_eq!(app_error.status_code(), 500);
        assert_eq!(app_error.message(), "Internal server error");

        let err = AccountError::from(PasswordHashError::HashingFailed("rng".to_string()));
        assert_eq!(err.to_app_error().message(), "Internal server error");
    }
}
