//! Chat transcript domain types.
//!
//! A transcript is a flat, per-user list of [`ChatMessage`] rows in
//! insertion order (`seq`). Each chat exchange
//! produces exactly two rows: one `user` turn and one `assistant` turn.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A persisted transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Insertion sequence; the transcript ordering key.
    pub seq: i64,
    pub user_id: UserId,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// The public projection of a message returned by `GET /memory`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageView {
    pub role: MessageRole,
    pub content: String,
}

impl From<&ChatMessage> for MessageView {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

/// Which terminal branch a chat turn ended in.
///
/// Lets callers branch on a closed tag set instead of comparing reply strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    /// The inbound message was empty; nothing was persisted.
    EmptyMessage,
    /// No model is configured; a placeholder reply was recorded.
    ModelUnavailable,
    /// The model produced text.
    Success,
    /// The provider blocked the prompt or response on safety grounds.
    Filtered,
    /// The provider answered with no usable text.
    Degraded,
    /// The provider call failed; the reply describes the failure class.
    ProviderError,
}

/// Result of one chat turn: the reply text plus the branch that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReply {
    pub text: String,
    pub kind: TurnKind,
}

impl TurnReply {
    pub fn new(text: impl Into<String>, kind: TurnKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}
