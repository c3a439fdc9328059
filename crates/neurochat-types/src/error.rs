use thiserror::Error;

/// Errors from repository operations (used by trait definitions in neurochat-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors related to registration, login and session resolution.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("username '{0}' already taken")]
    DuplicateUsername(String),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("not authenticated")]
    Unauthenticated,

    #[error("password hashing error: {0}")]
    Hashing(String),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}
