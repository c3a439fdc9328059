//! ChatService -- one user/assistant exchange per call.
//!
//! Turn states: `Start -> UserPersisted -> {ModelUnavailable | ModelInvoked}
//! -> {Success | Filtered | Degraded | ProviderError} -> AssistantPersisted`.
//! Every branch past the empty-message check records exactly two rows.

use std::sync::Arc;

use neurochat_types::chat::{ChatMessage, MessageRole, TurnKind, TurnReply};
use neurochat_types::config::PromptConfig;
use neurochat_types::error::RepositoryError;
use neurochat_types::user::{User, UserId};
use tracing::{debug, info, warn};

use crate::chat::prompt::render_prompt;
use crate::chat::reply::{
    EMPTY_MESSAGE_REPLY, MODEL_UNAVAILABLE_REPLY, reply_for_error, reply_for_outcome,
};
use crate::llm::registry::ModelRegistry;
use crate::repository::message::MessageRepository;

pub struct ChatService<M: MessageRepository> {
    messages: M,
    models: Arc<ModelRegistry>,
}

impl<M: MessageRepository> ChatService<M> {
    pub fn new(messages: M, models: Arc<ModelRegistry>) -> Self {
        Self { messages, models }
    }

    pub fn models(&self) -> &Arc<ModelRegistry> {
        &self.models
    }

    /// Run one chat turn for `user`.
    ///
    /// Provider failures are folded into the reply. Only storage failures
    /// surface as errors; if the assistant row cannot be written after a
    /// model call, the user row stays and the reply is lost.
    pub async fn handle_turn(
        &self,
        user: &User,
        text: &str,
        prompt_config: &PromptConfig,
    ) -> Result<TurnReply, RepositoryError> {
        if text.is_empty() {
            debug!(user_id = %user.id, "Empty message, skipping turn");
            return Ok(TurnReply::new(EMPTY_MESSAGE_REPLY, TurnKind::EmptyMessage));
        }

        self.messages
            .append_message(&user.id, MessageRole::User, text)
            .await?;

        // Read after the write so the active turn is the last context entry.
        let context = self
            .messages
            .recent_messages(&user.id, prompt_config.window())
            .await?;
        let prompt = render_prompt(prompt_config, &context);

        let reply = match self.models.current() {
            None => {
                warn!(user_id = %user.id, "No model configured");
                TurnReply::new(MODEL_UNAVAILABLE_REPLY, TurnKind::ModelUnavailable)
            }
            Some(provider) => {
                debug!(
                    user_id = %user.id,
                    model = provider.model(),
                    context_len = context.len(),
                    prompt_chars = prompt.chars().count(),
                    "Invoking model"
                );
                match provider.generate(&prompt).await {
                    Ok(outcome) => reply_for_outcome(outcome),
                    Err(e) => {
                        warn!(user_id = %user.id, error = %e, "Model call failed");
                        reply_for_error(&e)
                    }
                }
            }
        };

        self.messages
            .append_message(&user.id, MessageRole::Assistant, &reply.text)
            .await?;

        info!(user_id = %user.id, outcome = ?reply.kind, "Chat turn completed");
        Ok(reply)
    }

    /// Full transcript for a user, oldest first.
    pub async fn history(&self, user_id: &UserId) -> Result<Vec<ChatMessage>, RepositoryError> {
        self.messages.all_messages(user_id).await
    }

    /// Delete a user's transcript. Returns the number of rows removed.
    pub async fn clear_history(&self, user_id: &UserId) -> Result<u64, RepositoryError> {
        let removed = self.messages.clear_messages(user_id).await?;
        info!(user_id = %user_id, removed, "Chat history cleared");
        Ok(removed)
    }
}
