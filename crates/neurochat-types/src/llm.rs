//! Model provider outcome and error types.
//!
//! The provider adapter reduces every successful call to a closed
//! [`GenerationOutcome`] tag and every failed call to an [`LlmError`] variant,
//! so the chat pipeline never inspects raw provider payloads.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a successful generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum GenerationOutcome {
    /// The model produced non-blank text.
    Text(String),
    /// The provider terminated the generation on safety/content grounds.
    Blocked,
    /// The call succeeded but carried no usable text.
    Empty,
}

/// Errors from model provider operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LlmError {
    #[error("invalid API key or permission denied: {0}")]
    InvalidKey(String),

    #[error("quota or rate limit exceeded: {0}")]
    QuotaExceeded(String),

    #[error("provider request timed out")]
    Timeout,

    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Result of attempting to install a model with a given API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigureOutcome {
    /// The validation call succeeded; the model is installed.
    Ok,
    /// The provider rejected the key; no model is installed.
    InvalidKey,
    /// Validation failed for a reason unrelated to the key (e.g. network).
    /// The model is installed tentatively.
    Unknown,
    /// No usable key was supplied; no model is installed.
    Disabled,
}

impl fmt::Display for ConfigureOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigureOutcome::Ok => write!(f, "ok"),
            ConfigureOutcome::InvalidKey => write!(f, "invalid_key"),
            ConfigureOutcome::Unknown => write!(f, "unknown"),
            ConfigureOutcome::Disabled => write!(f, "disabled"),
        }
    }
}
