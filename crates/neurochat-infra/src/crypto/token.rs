//! Random session tokens with SHA-256 storage keys.

use neurochat_core::auth::token::SessionTokens;
use rand::Rng;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

/// Length of a generated token in characters.
pub const TOKEN_LENGTH: usize = 48;

/// OS-random alphanumeric tokens; only their hex SHA-256 digest is persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSessionTokens;

impl RandomSessionTokens {
    pub fn new() -> Self {
        Self
    }
}

impl SessionTokens for RandomSessionTokens {
    fn generate(&self) -> String {
        OsRng
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect()
    }

    fn hash(&self, token: &str) -> String {
        format!("{:x}", Sha256::digest(token.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_are_alphanumeric_and_unique() {
        let tokens = RandomSessionTokens::new();
        let a = tokens.generate();
        let b = tokens.generate();

        assert_eq!(a.len(), TOKEN_LENGTH);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_is_sha256_hex() {
        let tokens = RandomSessionTokens::new();
        assert_eq!(
            tokens.hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(tokens.hash("abc"), tokens.hash("abc"));
        assert_ne!(tokens.hash("abc"), tokens.hash("abd"));
    }
}
