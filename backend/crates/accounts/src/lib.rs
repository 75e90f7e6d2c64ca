//! Accounts Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, validation rules, repository traits
//! - `application/` - Registration use case and configuration
//! - `infra/` - PostgreSQL and in-memory account stores
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Account registration with username, password and optional full name
//! - Ordered structural validation with stable error messages
//!
//! ## Security Model
//! - Passwords hashed with bcrypt (cost 10) off the request task
//! - Password digests never appear in responses or logs
//! - Username uniqueness enforced atomically by the store

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AccountsConfig;
pub use application::register::RegistrationService;
pub use error::{AccountError, AccountResult};
pub use infra::memory::InMemoryAccountRepository;
pub use infra::postgres::PgAccountRepository;
pub use presentation::router::{accounts_router, accounts_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::validation::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAccountRepository as AccountStore;
}
