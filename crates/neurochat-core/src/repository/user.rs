//! UserRepository trait definition.

use neurochat_types::error::RepositoryError;
use neurochat_types::user::{User, UserCredentials, UserId};

/// Repository trait for user account persistence.
///
/// Implementations live in neurochat-infra (e.g., `SqliteUserRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// Fails with [`RepositoryError::Conflict`] if the username is taken.
    fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    /// Look up an account with its password hash, for credential checks.
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<UserCredentials>, RepositoryError>> + Send;

    /// Look up an account by its identifier.
    fn find_by_id(
        &self,
        id: &UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;
}
