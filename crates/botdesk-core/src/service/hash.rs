//! PasswordHasher trait definition.
//!
//! Storing passwords as salted one-way hashes is a correctness requirement
//! here, not a hardening option. The concrete argon2id implementation lives
//! in botdesk-infra.

use thiserror::Error;

/// Failure to produce a hash (verification failures are just `false`).
#[derive(Debug, Error)]
#[error("password hashing failed: {0}")]
pub struct HashError(pub String);

/// Trait for one-way password hashing with per-password salts.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing storable string.
    fn hash(&self, password: &str) -> Result<String, HashError>;

    /// Verify a plaintext password against a stored hash.
    fn verify(&self, password: &str, stored_hash: &str) -> bool;
}
