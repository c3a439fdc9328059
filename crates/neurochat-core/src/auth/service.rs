//! Authentication service: registration, login and session lifecycle.
//!
//! AuthService coordinates the UserRepository, SessionRepository, the
//! password hasher and the token generator. Registration logs the new user
//! in immediately, matching the behavior clients expect after sign-up.

use neurochat_types::error::{AuthError, RepositoryError};
use neurochat_types::user::User;
use tracing::{debug, info};

use crate::auth::hasher::CredentialHasher;
use crate::auth::session::SessionIdentity;
use crate::auth::token::SessionTokens;
use crate::repository::session::SessionRepository;
use crate::repository::user::UserRepository;

/// Upper bound on a presented token's length; anything longer is malformed.
const MAX_TOKEN_LEN: usize = 256;

/// Generic over its ports so neurochat-core never depends on neurochat-infra.
pub struct AuthService<U, S, H, T>
where
    U: UserRepository,
    S: SessionRepository,
    H: CredentialHasher,
    T: SessionTokens,
{
    users: U,
    sessions: S,
    hasher: H,
    tokens: T,
}

impl<U, S, H, T> AuthService<U, S, H, T>
where
    U: UserRepository,
    S: SessionRepository,
    H: CredentialHasher,
    T: SessionTokens,
{
    pub fn new(users: U, sessions: S, hasher: H, tokens: T) -> Self {
        Self {
            users,
            sessions,
            hasher,
            tokens,
        }
    }

    /// Create an account and open a session for it.
    ///
    /// Returns the new user and the session token to hand to the client.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(User, String), AuthError> {
        let username = validate_credentials(username, password)?;
        let password_hash = self.hasher.hash_password(password).await?;

        let user = self
            .users
            .create_user(username, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::DuplicateUsername(username.to_string()),
                other => AuthError::Storage(other),
            })?;

        info!(user_id = %user.id, "User registered");
        let token = self.begin_session(&user).await?;
        Ok((user, token))
    }

    /// Check credentials and open a session.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the caller.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(User, String), AuthError> {
        let username = validate_credentials(username, password)?;

        let credentials = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self
            .hasher
            .verify_password(password, &credentials.password_hash)
            .await?
        {
            debug!(user_id = %credentials.user.id, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let user = credentials.user;
        info!(user_id = %user.id, "User logged in");
        let token = self.begin_session(&user).await?;
        Ok((user, token))
    }
}

impl<U, S, H, T> SessionIdentity for AuthService<U, S, H, T>
where
    U: UserRepository,
    S: SessionRepository,
    H: CredentialHasher,
    T: SessionTokens,
{
    async fn begin_session(&self, user: &User) -> Result<String, AuthError> {
        let token = self.tokens.generate();
        self.sessions
            .create_session(&self.tokens.hash(&token), &user.id)
            .await?;
        Ok(token)
    }

    async fn resolve_session(&self, token: Option<&str>) -> Result<Option<User>, AuthError> {
        let Some(token) = token.filter(|t| is_well_formed(t)) else {
            return Ok(None);
        };

        let Some(user_id) = self.sessions.find_session(&self.tokens.hash(token)).await? else {
            return Ok(None);
        };

        Ok(self.users.find_by_id(&user_id).await?)
    }

    async fn end_session(&self, token: &str) -> Result<(), AuthError> {
        if !is_well_formed(token) {
            return Ok(());
        }
        self.sessions
            .delete_session(&self.tokens.hash(token))
            .await?;
        info!("Session ended");
        Ok(())
    }
}

/// Trim the username and reject empty fields.
fn validate_credentials<'a>(username: &'a str, password: &str) -> Result<&'a str, AuthError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::Validation(
            "Username and password are required".to_string(),
        ));
    }
    Ok(username)
}

fn is_well_formed(token: &str) -> bool {
    !token.is_empty()
        && token.len() <= MAX_TOKEN_LEN
        && token.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::require_user;
    use crate::testing::{FakeHasher, FakeTokens, InMemoryStore};

    fn service(store: &InMemoryStore) -> AuthService<InMemoryStore, InMemoryStore, FakeHasher, FakeTokens> {
        AuthService::new(store.clone(), store.clone(), FakeHasher, FakeTokens::default())
    }

    #[tokio::test]
    async fn test_register_creates_user_and_session() {
        let store = InMemoryStore::default();
        let auth = service(&store);

        let (user, token) = auth.register("alice", "s3cret").await.unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(store.user_count(), 1);

        let resolved = auth.resolve_session(Some(&token)).await.unwrap();
        assert_eq!(resolved.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_register_duplicate_is_conflict() {
        let store = InMemoryStore::default();
        let auth = service(&store);

        auth.register("alice", "s3cret").await.unwrap();
        let err = auth.register("alice", "other").await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUsername(ref name) if name == "alice"));
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn test_register_requires_fields() {
        let store = InMemoryStore::default();
        let auth = service(&store);

        assert!(matches!(
            auth.register("   ", "pw").await,
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            auth.register("bob", "").await,
            Err(AuthError::Validation(_))
        ));
        assert_eq!(store.user_count(), 0);
    }

    #[tokio::test]
    async fn test_login_resolves_registered_id() {
        let store = InMemoryStore::default();
        let auth = service(&store);

        let (registered, _) = auth.register("alice", "s3cret").await.unwrap();
        let (user, token) = auth.login(" alice ", "s3cret").await.unwrap();
        assert_eq!(user.id, registered.id);

        let resolved = require_user(&auth, Some(&token)).await.unwrap();
        assert_eq!(resolved.id, registered.id);
    }

    #[tokio::test]
    async fn test_login_wrong_password_creates_no_session() {
        let store = InMemoryStore::default();
        let auth = service(&store);

        auth.register("alice", "s3cret").await.unwrap();
        let sessions_before = store.session_count();

        let err = auth.login("alice", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        let err = auth.login("nobody", "s3cret").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(store.session_count(), sessions_before);
    }

    #[tokio::test]
    async fn test_resolve_missing_or_malformed_token() {
        let store = InMemoryStore::default();
        let auth = service(&store);

        assert!(auth.resolve_session(None).await.unwrap().is_none());
        assert!(auth.resolve_session(Some("")).await.unwrap().is_none());
        assert!(auth.resolve_session(Some("not a token!")).await.unwrap().is_none());
        assert!(auth.resolve_session(Some("unknowntoken")).await.unwrap().is_none());

        let err = require_user(&auth, None).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_end_session_invalidates_token() {
        let store = InMemoryStore::default();
        let auth = service(&store);

        let (_, token) = auth.register("alice", "s3cret").await.unwrap();
        auth.end_session(&token).await.unwrap();
        assert!(auth.resolve_session(Some(&token)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resolve_after_user_removed() {
        let store = InMemoryStore::default();
        let auth = service(&store);

        let (user, token) = auth.register("alice", "s3cret").await.unwrap();
        store.remove_user(&user.id);
        assert!(auth.resolve_session(Some(&token)).await.unwrap().is_none());
    }
}
