//! SessionTokens trait for opaque session credentials.

/// Generates opaque session tokens and derives their storage keys.
///
/// Only `hash(token)` is ever persisted; the plaintext token lives in the
/// client's cookie.
pub trait SessionTokens: Send + Sync {
    /// Produce a fresh, unguessable token.
    fn generate(&self) -> String;

    /// Derive the storage key for a token. Must be deterministic.
    fn hash(&self, token: &str) -> String;
}
