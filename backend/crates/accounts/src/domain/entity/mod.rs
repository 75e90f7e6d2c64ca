//! Entity Module

pub mod account;

pub use account::{Account, NewAccount, PublicAccountView};
