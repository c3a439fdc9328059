//! Argon2id password hashing.
//!
//! Implements the `CredentialHasher` trait from `neurochat-core`. Hashes are
//! stored as PHC strings, so the salt and parameters travel with the hash.
//! The Argon2 work runs on tokio's blocking pool.

use std::sync::LazyLock;

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use neurochat_core::auth::hasher::CredentialHasher;
use neurochat_types::error::AuthError;
use tokio::task::spawn_blocking;

static CONTEXT: LazyLock<Argon2<'static>> = LazyLock::new(|| {
    Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2::Params::DEFAULT,
    )
});

/// Argon2id implementation of `CredentialHasher`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2CredentialHasher;

impl Argon2CredentialHasher {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let password = password.to_owned();
        spawn_blocking(move || hash(&password))
            .await
            .map_err(|e| AuthError::Hashing(format!("hashing task failed: {e}")))?
    }

    async fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool, AuthError> {
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();
        spawn_blocking(move || verify(&password, &password_hash))
            .await
            .map_err(|e| AuthError::Hashing(format!("verification task failed: {e}")))?
    }
}

fn hash(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    CONTEXT
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

fn verify(password: &str, password_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| AuthError::Hashing(format!("could not parse password hash: {e}")))?;

    match CONTEXT.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Hashing(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = Argon2CredentialHasher::new();
        let hash = hasher.hash_password("s3cret").await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("s3cret", &hash).await.unwrap());
        assert!(!hasher.verify_password("wrong", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let hasher = Argon2CredentialHasher::new();
        let a = hasher.hash_password("same").await.unwrap();
        let b = hasher.hash_password("same").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_corrupt_hash_is_error() {
        let hasher = Argon2CredentialHasher::new();
        let result = hasher.verify_password("pw", "not-a-phc-string").await;
        assert!(matches!(result, Err(AuthError::Hashing(_))));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_hashing_leaves_runtime_free() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let ticker = {
            let ticks = ticks.clone();
            tokio::spawn(async move {
                loop {
                    ticks.fetch_add(1, Ordering::SeqCst);
                    tokio::task::yield_now().await;
                }
            })
        };

        let hasher = Argon2CredentialHasher::new();
        let hash = hasher.hash_password("s3cret").await.unwrap();
        assert!(ticks.load(Ordering::SeqCst) > 0, "hashing blocked the only worker");

        let before = ticks.load(Ordering::SeqCst);
        assert!(hasher.verify_password("s3cret", &hash).await.unwrap());
        assert!(ticks.load(Ordering::SeqCst) > before, "verification blocked the only worker");

        ticker.abort();
    }
}
