//! API key configuration endpoints.
//!
//! Failures here use `{"status": "error", "message": ...}` rather than the
//! usual error body, matching what the web UI expects.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ConfigStatus {
    pub has_api_key: bool,
    pub model_available: bool,
}

#[derive(Debug, Deserialize)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub gemini_api_key: Option<String>,
}

/// GET /config
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigStatus> {
    Json(ConfigStatus {
        has_api_key: state.config.secrets().has_api_key(),
        model_available: state.models.is_available(),
    })
}

/// POST /config -- a changed key is persisted and revalidated.
pub async fn update_config(
    State(state): State<AppState>,
    body: Result<Json<ConfigUpdate>, JsonRejection>,
) -> Response {
    let Json(update) = match body {
        Ok(body) => body,
        Err(rejection) => return config_error(rejection.body_text()),
    };

    let changed = match state
        .config
        .update_api_key(update.gemini_api_key.as_deref())
        .await
    {
        Ok(changed) => changed,
        Err(e) => {
            tracing::error!(error = %e, "Failed to save configuration");
            return config_error(e.to_string());
        }
    };

    if changed {
        let outcome = state.configure_model().await;
        tracing::info!(%outcome, "Model reconfigured after key update");
    }

    Json(json!({
        "status": "success",
        "model_available": state.models.is_available(),
    }))
    .into_response()
}

fn config_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "status": "error", "message": message })),
    )
        .into_response()
}
