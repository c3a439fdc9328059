//! Cryptographic operations for Neurochat.
//!
//! - `password`: Argon2id password hashing (`CredentialHasher`)
//! - `token`: random session tokens and their SHA-256 storage keys (`SessionTokens`)

pub mod password;
pub mod token;
