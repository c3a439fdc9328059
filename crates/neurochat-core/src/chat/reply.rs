//! User-facing replies for every terminal branch of a chat turn.
//!
//! Provider failures never reach the client as errors; each class maps to
//! a fixed or templated string. Templated replies carry a bounded excerpt
//! of the underlying message, flattened to a single line.

use neurochat_types::chat::{TurnKind, TurnReply};
use neurochat_types::llm::{GenerationOutcome, LlmError};

pub const EMPTY_MESSAGE_REPLY: &str = "I didn't receive a message.";
pub const MODEL_UNAVAILABLE_REPLY: &str =
    "Gemini API is not configured. Please check your API key.";
pub const FILTERED_REPLY: &str = "Filtered";
pub const DEGRADED_REPLY: &str = "Somone tell Vedal there is a problem with my Internet";
pub const INVALID_KEY_REPLY: &str = "Somone tell Vedal there is a problem with my API";
pub const QUOTA_EXCEEDED_REPLY: &str = "API quota exceeded. Please try again later.";
pub const TIMEOUT_REPLY: &str = "The AI took too long to respond. Please try again.";
pub const PROVIDER_ERROR_PREFIX: &str = "API error: ";
pub const UNEXPECTED_ERROR_PREFIX: &str = "Somone tell Vedal there is a problem with my AI: ";

/// Maximum number of characters of an error message echoed to the user.
pub const ERROR_EXCERPT_CHARS: usize = 100;

/// Reply for a successful provider call.
pub fn reply_for_outcome(outcome: GenerationOutcome) -> TurnReply {
    match outcome {
        GenerationOutcome::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                TurnReply::new(DEGRADED_REPLY, TurnKind::Degraded)
            } else {
                TurnReply::new(trimmed, TurnKind::Success)
            }
        }
        GenerationOutcome::Blocked => TurnReply::new(FILTERED_REPLY, TurnKind::Filtered),
        GenerationOutcome::Empty => TurnReply::new(DEGRADED_REPLY, TurnKind::Degraded),
    }
}

/// Reply for a failed provider call.
pub fn reply_for_error(error: &LlmError) -> TurnReply {
    let text = match error {
        LlmError::InvalidKey(_) => INVALID_KEY_REPLY.to_string(),
        LlmError::QuotaExceeded(_) => QUOTA_EXCEEDED_REPLY.to_string(),
        LlmError::Timeout => TIMEOUT_REPLY.to_string(),
        LlmError::Provider { message } => format!("{PROVIDER_ERROR_PREFIX}{}", excerpt(message)),
        LlmError::Unexpected(message) => {
            format!("{UNEXPECTED_ERROR_PREFIX}{}", excerpt(message))
        }
    };
    TurnReply::new(text, TurnKind::ProviderError)
}

/// First [`ERROR_EXCERPT_CHARS`] characters of `message`, whitespace collapsed.
fn excerpt(message: &str) -> String {
    message
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(ERROR_EXCERPT_CHARS)
        .collect()
}
