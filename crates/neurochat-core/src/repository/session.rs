//! SessionRepository trait definition.
//!
//! Sessions are keyed by the hash of the opaque token handed to the client;
//! the plaintext token is never stored.

use neurochat_types::error::RepositoryError;
use neurochat_types::user::UserId;

pub trait SessionRepository: Send + Sync {
    /// Bind a token hash to a user.
    fn create_session(
        &self,
        token_hash: &str,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Resolve a token hash to the bound user id, if any.
    fn find_session(
        &self,
        token_hash: &str,
    ) -> impl std::future::Future<Output = Result<Option<UserId>, RepositoryError>> + Send;

    /// Remove a session. Removing an unknown hash is not an error.
    fn delete_session(
        &self,
        token_hash: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
