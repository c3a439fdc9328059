//! MessageRepository trait definition.
//!
//! Every method is a single statement against the store; none of them may
//! span the external model call.

use neurochat_types::chat::{ChatMessage, MessageRole};
use neurochat_types::error::RepositoryError;
use neurochat_types::user::UserId;

/// Repository trait for per-user chat transcripts.
pub trait MessageRepository: Send + Sync {
    /// Append one transcript row with a fresh creation timestamp.
    fn append_message(
        &self,
        user_id: &UserId,
        role: MessageRole,
        content: &str,
    ) -> impl std::future::Future<Output = Result<ChatMessage, RepositoryError>> + Send;

    /// The most recent `limit` messages, returned oldest first.
    fn recent_messages(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// The full transcript, oldest first.
    fn all_messages(
        &self,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Delete every message owned by the user. Returns the number removed.
    fn clear_messages(
        &self,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
