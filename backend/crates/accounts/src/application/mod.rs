//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod register;

// Re-exports
pub use config::AccountsConfig;
pub use register::RegistrationService;
