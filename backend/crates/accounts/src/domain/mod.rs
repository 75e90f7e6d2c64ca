//! Domain Layer
//!
//! Contains entities, value objects, validation rules and repository traits.

pub mod entity;
pub mod repository;
pub mod validation;
pub mod value_object;

// Re-exports
pub use entity::{Account, NewAccount, PublicAccountView};
pub use repository::AccountRepository;
pub use validation::{NormalizedRequest, RegistrationRequest, ValidationError, validate};
