//! CredentialHasher trait for password storage.

use neurochat_types::error::AuthError;

/// Salted one-way password hashing.
///
/// Implementations must keep the hashing work off the async worker threads
/// (e.g., `Argon2CredentialHasher` in neurochat-infra uses `spawn_blocking`).
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing string (salt included).
    fn hash_password(
        &self,
        password: &str,
    ) -> impl std::future::Future<Output = Result<String, AuthError>> + Send;

    /// Check a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` for a wrong password and `Err` only when the
    /// stored hash itself cannot be processed.
    fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> impl std::future::Future<Output = Result<bool, AuthError>> + Send;
}
