//! Password Hashing and Verification
//!
//! bcrypt-based password handling with:
//! - Adaptive cost factor (2^10 rounds by default)
//! - Random 128-bit salt per digest, drawn from the OS RNG
//! - Self-describing digests (`$2b$<cost>$<salt><hash>`)
//! - Constant-time comparison
//! - Zeroization of the clear text
//!
//! Hashing is CPU-bound; async callers should go through
//! [`ClearTextPassword::hash_blocking`] so the work runs on the blocking pool.

use std::fmt;

use bcrypt::{HashParts, Version};
use rand::{RngCore, rngs::OsRng};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length, also the bcrypt input limit in bytes
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// bcrypt cost factor used for new digests
pub const HASH_COST: u32 = 10;

const SALT_LENGTH: usize = 16;

/// Prefix of digests produced by this module
const DIGEST_PREFIX: &str = "$2b$";

// ============================================================================
// Error Types
// ============================================================================

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed (RNG failure, invalid cost, worker panic)
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored digest is not a valid bcrypt string
    #[error("Corrupt password digest")]
    CorruptDigest,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// No policy is applied here; length and whitespace rules belong to the
/// caller's validation step.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the password as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password with bcrypt at the given cost
    ///
    /// Blocks the current thread for the whole key schedule. Input over
    /// 72 bytes is an error, never truncated.
    pub fn hash(&self, cost: u32) -> Result<HashedPassword, PasswordHashError> {
        let mut salt = [0u8; SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        let parts = bcrypt::non_truncating_hash_with_salt(self.as_bytes(), cost, salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: parts.format_for_version(Version::TwoB),
        })
    }

    /// Hash on the blocking thread pool, consuming the password
    pub async fn hash_blocking(self, cost: u32) -> Result<HashedPassword, PasswordHashError> {
        tokio::task::spawn_blocking(move || self.hash(cost))
            .await
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// bcrypt digest in modular crypt format
///
/// The string embeds algorithm version, cost, salt and hash, so verification
/// needs nothing besides the digest itself.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from a stored digest (e.g., from database)
    pub fn from_digest(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        parse_digest(&hash)?;
        Ok(Self { hash })
    }

    /// Get the digest for storage
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Cost factor embedded in the digest
    pub fn cost(&self) -> Result<u32, PasswordHashError> {
        parse_digest(&self.hash).map(|parts| parts.get_cost())
    }

    /// Verify a password against this digest in constant time
    pub fn verify(&self, password: &ClearTextPassword) -> Result<bool, PasswordHashError> {
        verify_bytes(password.as_bytes(), &self.hash)
    }

    /// Check if the digest was produced with other parameters than `cost`
    pub fn needs_rehash(&self, cost: u32) -> bool {
        if !self.hash.starts_with(DIGEST_PREFIX) {
            return true;
        }

        match self.cost() {
            Ok(current) => current != cost,
            Err(_) => true,
        }
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

/// Verify a plaintext against a raw digest string
///
/// A mismatch is `Ok(false)`; only a malformed digest is an error.
pub fn verify_digest(plaintext: &str, digest: &str) -> Result<bool, PasswordHashError> {
    verify_bytes(plaintext.as_bytes(), digest)
}

/// Overlong input can never match: no digest here is made from it
fn verify_bytes(plaintext: &[u8], digest: &str) -> Result<bool, PasswordHashError> {
    if plaintext.len() > MAX_PASSWORD_LENGTH {
        parse_digest(digest)?;
        return Ok(false);
    }

    bcrypt::verify(plaintext, digest).map_err(|_| PasswordHashError::CorruptDigest)
}

fn parse_digest(digest: &str) -> Result<HashParts, PasswordHashError> {
    digest
        .parse::<HashParts>()
        .map_err(|_| PasswordHashError::CorruptDigest)
}

// ============================================================================
// Tests
// ============================================================================
