//! Injected secret-handling collaborators: one-way hashing and randomness.
//!
//! The share subsystem never calls a hashing library or the OS random
//! generator directly; it receives these traits at construction time so
//! tests can substitute deterministic implementations.

use crate::result::AppResult;

/// One-way, salted hashing of share passwords.
pub trait SecretHasher: Send + Sync + std::fmt::Debug + 'static {
    /// Hash a plaintext secret with a fresh random salt.
    fn hash(&self, secret: &str) -> AppResult<String>;

    /// Verify a plaintext secret against a stored hash in constant time.
    ///
    /// Returns `Ok(false)` on mismatch and `Err` when the stored hash
    /// cannot be used at all (corrupt or unsupported format).
    fn verify(&self, secret: &str, hash: &str) -> AppResult<bool>;
}

/// Source of cryptographically secure random bytes.
pub trait RandomSource: Send + Sync + std::fmt::Debug + 'static {
    /// Fill `buf` entirely with random bytes.
    fn fill(&self, buf: &mut [u8]) -> AppResult<()>;
}
