//! Axum router configuration with middleware.
//!
//! Middleware: session cookies, CORS, request tracing. When a web directory
//! is given and exists, it is served for every path the API does not claim.

use std::path::Path;

use axum::Router;
use axum::routing::{get, post};
use tower_cookies::CookieManagerLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState, web_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        // Accounts and sessions
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/auth/status", get(handlers::auth::status))
        // Chat
        .route("/chat", post(handlers::chat::chat))
        .route("/memory", get(handlers::chat::memory))
        .route("/clear_memory", post(handlers::chat::clear_memory))
        // Configuration
        .route(
            "/config",
            get(handlers::config::get_config).post(handlers::config::update_config),
        )
        // Liveness
        .route("/ping", get(handlers::system::ping))
        .route("/health", get(handlers::system::health))
        .with_state(state);

    if let Some(dir) = web_dir {
        if dir.exists() {
            let serve_dir = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
            router = router.fallback_service(serve_dir);
            tracing::info!(path = %dir.display(), "Static web UI serving enabled");
        } else {
            tracing::warn!(path = %dir.display(), "Web directory not found, serving API only");
        }
    }

    router
        .layer(CookieManagerLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
