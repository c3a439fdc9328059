//! Prompt rendering for the context window.

use neurochat_types::chat::{ChatMessage, MessageRole};
use neurochat_types::config::PromptConfig;

/// Render a context window into a single prompt.
///
/// Layout, one entry per line:
/// 1. the system preamble (omitted when blank)
/// 2. `"<label>: <content>"` for each message, oldest first
/// 3. `"<assistant_label>:"` as the cue for the model to answer
pub fn render_prompt(config: &PromptConfig, context: &[ChatMessage]) -> String {
    let mut lines = Vec::with_capacity(context.len() + 2);

    if !config.system_prompt.trim().is_empty() {
        lines.push(config.system_prompt.clone());
    }

    for message in context {
        let label = match message.role {
            MessageRole::User => &config.user_label,
            MessageRole::Assistant => &config.assistant_label,
        };
        lines.push(format!("{label}: {}", message.content));
    }

    lines.push(format!("{}:", config.assistant_label));
    lines.join("\n")
}
