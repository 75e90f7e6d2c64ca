//! Value Object Module

pub mod account_id;
pub mod user_password;

pub use account_id::AccountId;
pub use user_password::UserPassword;
