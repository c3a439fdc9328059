//! Session cookie extractors.
//!
//! The client holds an opaque token in the `neurochat_session` cookie;
//! resolution goes through the `SessionIdentity` capability. Requires the
//! `CookieManagerLayer` on the router.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use neurochat_core::auth::session::{SessionIdentity, require_user};
use neurochat_types::user::User;
use tower_cookies::cookie::SameSite;
use tower_cookies::cookie::time::Duration;
use tower_cookies::{Cookie, Cookies};

use crate::http::error::AppError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "neurochat_session";
const SESSION_MAX_AGE_DAYS: i64 = 7;

/// Hand a fresh session token to the client.
pub fn set_session_cookie(cookies: &Cookies, token: String) {
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::days(SESSION_MAX_AGE_DAYS))
        .build();
    cookies.add(cookie);
}

pub fn clear_session_cookie(cookies: &Cookies) {
    cookies.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
}

pub fn session_token(cookies: &Cookies) -> Option<String> {
    cookies.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

fn request_cookies(parts: &Parts) -> Result<Cookies, AppError> {
    parts
        .extensions
        .get::<Cookies>()
        .cloned()
        .ok_or_else(|| AppError::internal("Internal server error", "cookie layer missing"))
}

/// The authenticated caller. Rejects with 401 when there is no valid session.
pub struct SessionUser(pub User);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let cookies = request_cookies(parts)?;
        let token = session_token(&cookies);
        let user = require_user(state.auth_service.as_ref(), token.as_deref()).await?;
        Ok(SessionUser(user))
    }
}

/// The caller if a valid session is present.
pub struct MaybeSessionUser(pub Option<User>);

impl FromRequestParts<AppState> for MaybeSessionUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let cookies = request_cookies(parts)?;
        let token = session_token(&cookies);
        let user = state.auth_service.resolve_session(token.as_deref()).await?;
        Ok(MaybeSessionUser(user))
    }
}
