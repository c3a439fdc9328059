//! Application error type mapping to HTTP status codes.
//!
//! Error bodies are `{"error": "<message>"}`. Internal details are logged,
//! never returned.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use neurochat_types::error::{AuthError, RepositoryError};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username already taken")]
    Conflict,

    #[error("{public}")]
    Internal { public: String, detail: String },
}

impl AppError {
    /// A 500 that reports `public` to the client and logs `detail`.
    pub fn internal(public: impl Into<String>, detail: impl ToString) -> Self {
        AppError::Internal {
            public: public.into(),
            detail: detail.to_string(),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(msg) => AppError::Validation(msg),
            AuthError::DuplicateUsername(_) => AppError::Conflict,
            AuthError::InvalidCredentials => AppError::InvalidCredentials,
            AuthError::Unauthenticated => AppError::Unauthenticated,
            other => AppError::internal("Internal server error", other),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::internal("Internal server error", e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::Internal { detail, .. } => {
                tracing::error!("Internal error: {detail}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
