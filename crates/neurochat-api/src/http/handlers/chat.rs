//! Chat turn, transcript and clear-history endpoints.

use axum::Json;
use axum::extract::State;
use neurochat_types::chat::MessageView;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::http::error::AppError;
use crate::http::extractors::json::JsonBody;
use crate::http::extractors::session::SessionUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /chat -- provider failures arrive as reply text, never as errors.
pub async fn chat(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    JsonBody(body): JsonBody<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let prompt_config = state.config.prompt();
    let reply = state
        .chat_service
        .handle_turn(&user, &body.message, &prompt_config)
        .await?;

    Ok(Json(ChatResponse { response: reply.text }))
}

/// GET /memory -- the caller's transcript, oldest first.
pub async fn memory(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<Vec<MessageView>>, AppError> {
    let history = state.chat_service.history(&user.id).await?;
    Ok(Json(history.iter().map(MessageView::from).collect()))
}

/// POST /clear_memory
pub async fn clear_memory(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<serde_json::Value>, AppError> {
    state.chat_service.clear_history(&user.id).await?;
    Ok(Json(json!({ "status": "cleared" })))
}
