//! User Password Value Object
//!
//! Domain wrapper around the bcrypt digest stored for an account.
//! Delegates to `platform::password` for cryptographic operations.
//!
//! ## Usage
//! ```rust,ignore
//! let digest = UserPassword::hash(ClearTextPassword::new("examplePass"), 10).await?;
//! assert!(digest.verify("examplePass")?);
//! ```

use platform::password::{ClearTextPassword, HashedPassword};
use std::fmt;

use crate::error::AccountResult;

/// Hashed user password for database storage
///
/// Never serialized and never logged: both `Debug` and `Display` are redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a clear text password on the blocking pool
    pub async fn hash(password: ClearTextPassword, cost: u32) -> AccountResult<Self> {
        let hashed = password.hash_blocking(cost).await?;
        Ok(Self(hashed))
    }

    /// Create from a stored digest (from database)
    pub fn from_digest(digest: impl Into<String>) -> AccountResult<Self> {
        let hashed = HashedPassword::from_digest(digest)?;
        Ok(Self(hashed))
    }

    /// Get the digest for database storage
    pub fn as_digest(&self) -> &str {
        self.0.as_str()
    }

    /// Verify a plaintext against this digest
    ///
    /// Uses constant-time comparison. Returns `Ok(false)` on mismatch.
    pub fn verify(&self, plaintext: &str) -> AccountResult<bool> {
        let candidate = ClearTextPassword::new(plaintext);
        Ok(self.0.verify(&candidate)?)
    }

    /// Check if the digest should be regenerated at `cost`
    pub fn needs_rehash(&self, cost: u32) -> bool {
        self.0.needs_rehash(cost)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

impl fmt::Display for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HASHED_PASSWORD]")
    }
}
