//! Application Configuration
//!
//! Configuration for the Accounts application layer.

use platform::password::HASH_COST;

/// Accounts application configuration
#[derive(Debug, Clone)]
pub struct AccountsConfig {
    /// bcrypt cost factor for new password digests (2^cost rounds)
    pub hash_cost: u32,
    /// Path the accounts router is mounted at, used for `Location` headers
    pub resource_path: String,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            hash_cost: HASH_COST,
            resource_path: "/api/users".to_string(),
        }
    }
}

impl AccountsConfig {
    /// Location of a created account
    pub fn location_of(&self, id: impl std::fmt::Display) -> String {
        format!("{}/{}", self.resource_path.trim_end_matches('/'), id)
    }
}
