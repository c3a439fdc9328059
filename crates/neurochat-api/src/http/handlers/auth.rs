//! Registration, login, logout and session status.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use neurochat_core::auth::session::SessionIdentity;
use neurochat_types::error::AuthError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_cookies::Cookies;

use crate::http::error::AppError;
use crate::http::extractors::json::JsonBody;
use crate::http::extractors::session::{
    MaybeSessionUser, SessionUser, clear_session_cookie, session_token, set_session_cookie,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub status: &'static str,
    pub username: String,
}

/// POST /register -- create an account and log it in.
pub async fn register(
    State(state): State<AppState>,
    cookies: Cookies,
    JsonBody(body): JsonBody<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (user, token) = state
        .auth_service
        .register(&body.username, &body.password)
        .await
        .map_err(|e| match e {
            AuthError::Validation(_) | AuthError::DuplicateUsername(_) => AppError::from(e),
            other => AppError::internal("Registration failed", other),
        })?;

    set_session_cookie(&cookies, token);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            status: "registered",
            username: user.username,
        }),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    JsonBody(body): JsonBody<CredentialsRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let (user, token) = state.auth_service.login(&body.username, &body.password).await?;

    set_session_cookie(&cookies, token);

    Ok(Json(AuthResponse {
        status: "logged_in",
        username: user.username,
    }))
}

/// POST /logout -- requires a session.
pub async fn logout(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    cookies: Cookies,
) -> Result<Json<serde_json::Value>, AppError> {
    if let Some(token) = session_token(&cookies) {
        state.auth_service.end_session(&token).await?;
    }
    clear_session_cookie(&cookies);

    tracing::info!(user_id = %user.id, "User logged out");
    Ok(Json(json!({ "status": "logged_out" })))
}

#[derive(Debug, Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// GET /auth/status
pub async fn status(MaybeSessionUser(user): MaybeSessionUser) -> Json<AuthStatus> {
    Json(AuthStatus {
        authenticated: user.is_some(),
        username: user.map(|u| u.username),
    })
}
