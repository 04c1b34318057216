//! Password hashing using bcrypt
//!
//! Hashes are self-describing `$2b$<cost>$<salt><digest>` strings, so
//! verification needs nothing but the stored hash.
//!
//! # Performance Considerations
//!
//! bcrypt is intentionally CPU-intensive. In async contexts use
//! `hash_async` / `verify_async`, which run on the blocking thread pool.
//!
//! # Input length
//!
//! bcrypt only reads the first [`MAX_PASSWORD_BYTES`] bytes of a password.
//! Longer passwords are accepted and silently truncated, so two passwords
//! sharing their first 72 bytes verify against each other's hash.

use anyhow::Result;
use tracing::debug;

/// bcrypt cost used when none is configured
pub const DEFAULT_COST: u32 = 10;

/// Cost factors bcrypt accepts; anything else fails every hash
pub const COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Bytes of a password that contribute to its bcrypt hash
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Password hashing service
///
/// Passwords longer than [`MAX_PASSWORD_BYTES`] are truncated by bcrypt
/// before hashing and verification.
#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    cost: u32,
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordService {
    /// Create a hasher with the given bcrypt cost factor
    ///
    /// The cost must lie in [`COST_RANGE`]; startup checks this through
    /// `AppConfig::validate`.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    #[inline]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password with a fresh random salt (blocking operation)
    pub fn hash(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Hash a password with a caller-supplied salt
    ///
    /// Deterministic for a given salt and cost. Only meant for tests;
    /// production hashing always goes through [`PasswordService::hash`].
    pub fn hash_with_salt(&self, password: &str, salt: [u8; 16]) -> Result<String> {
        let parts = bcrypt::hash_with_salt(password, self.cost, salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
        Ok(parts.to_string())
    }

    /// Hash a password asynchronously (non-blocking)
    ///
    /// Spawns the CPU-intensive work on a blocking thread pool,
    /// preventing it from blocking the async runtime.
    pub async fn hash_async(&self, password: String) -> Result<String> {
        let service = *self;
        tokio::task::spawn_blocking(move || service.hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// Returns `false` for a wrong password and for a malformed hash alike.
    /// The digest comparison inside bcrypt is constant time.
    pub fn verify(password: &str, hash: &str) -> bool {
        match bcrypt::verify(password, hash) {
            Ok(valid) => valid,
            Err(e) => {
                debug!("Rejecting unparseable password hash: {}", e);
                false
            }
        }
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))
    }
}
