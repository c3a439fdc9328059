//! Liveness endpoints (no auth).

use axum::Json;
use serde_json::{Value, json};

/// GET /ping
pub async fn ping() -> Json<Value> {
    Json(json!({ "status": "online", "model_mode": "Gemini" }))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
