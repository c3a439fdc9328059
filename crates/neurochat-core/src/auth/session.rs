//! SessionIdentity capability.
//!
//! Maps an opaque, client-held session token to a [`User`]. Any session
//! layer (cookie extractor, CLI, tests) works against this trait rather
//! than against a concrete service.

use neurochat_types::error::AuthError;
use neurochat_types::user::User;

pub trait SessionIdentity: Send + Sync {
    /// Issue a new token bound to `user`. The caller hands it to the client.
    fn begin_session(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<String, AuthError>> + Send;

    /// Resolve a presented token.
    ///
    /// A missing, malformed or unknown token, or one whose user no longer
    /// exists, yields `Ok(None)`. Only storage failures are errors.
    fn resolve_session(
        &self,
        token: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Option<User>, AuthError>> + Send;

    /// Invalidate a token for future resolution.
    fn end_session(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<(), AuthError>> + Send;
}

/// Resolve a token or fail with [`AuthError::Unauthenticated`].
pub async fn require_user<I: SessionIdentity>(
    identity: &I,
    token: Option<&str>,
) -> Result<User, AuthError> {
    identity
        .resolve_session(token)
        .await?
        .ok_or(AuthError::Unauthenticated)
}
