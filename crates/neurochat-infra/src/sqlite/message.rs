//! SQLite chat transcript repository.
//!
//! Rows are ordered by the autoincrement `id`, which SQLite assigns under
//! the single writer connection, so it follows commit order even when two
//! appends read the clock in the opposite order. `created_at` is informational.

use chrono::Utc;
use neurochat_core::repository::message::MessageRepository;
use neurochat_types::chat::{ChatMessage, MessageRole};
use neurochat_types::error::RepositoryError;
use neurochat_types::user::UserId;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, map_sqlx_error, parse_datetime, parse_user_id};

/// SQLite-backed implementation of `MessageRepository`.
#[derive(Clone)]
pub struct SqliteMessageRepository {
    pool: DatabasePool,
}

impl SqliteMessageRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct MessageRow {
    id: i64,
    user_id: String,
    role: String,
    content: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        Ok(ChatMessage {
            seq: self.id,
            user_id: parse_user_id(&self.user_id)?,
            role: self.role.parse().map_err(RepositoryError::Query)?,
            content: self.content,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

fn rows_to_messages(rows: &[sqlx::sqlite::SqliteRow]) -> Result<Vec<ChatMessage>, RepositoryError> {
    let mut messages = Vec::with_capacity(rows.len());
    for row in rows {
        let r = MessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
        messages.push(r.into_message()?);
    }
    Ok(messages)
}

impl MessageRepository for SqliteMessageRepository {
    async fn append_message(
        &self,
        user_id: &UserId,
        role: MessageRole,
        content: &str,
    ) -> Result<ChatMessage, RepositoryError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO messages (user_id, role, content, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id.to_string())
        .bind(role.to_string())
        .bind(content)
        .bind(format_datetime(&created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx_error)?;

        Ok(ChatMessage {
            seq: result.last_insert_rowid(),
            user_id: *user_id,
            role,
            content: content.to_string(),
            created_at,
        })
    }

    async fn recent_messages(&self, user_id: &UserId, limit: u32) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT id, user_id, role, content, created_at FROM messages
               WHERE user_id = ?
               ORDER BY id DESC
               LIMIT ?"#,
        )
        .bind(user_id.to_string())
        .bind(limit as i64)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(map_sqlx_error)?;

        let mut messages = rows_to_messages(&rows)?;
        messages.reverse();
        Ok(messages)
    }

    async fn all_messages(&self, user_id: &UserId) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT id, user_id, role, content, created_at FROM messages
               WHERE user_id = ?
               ORDER BY id ASC"#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(map_sqlx_error)?;

        rows_to_messages(&rows)
    }

    async fn clear_messages(&self, user_id: &UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM messages WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::test_support::test_pool;
    use crate::sqlite::user::SqliteUserRepository;
    use neurochat_core::repository::user::UserRepository;

    async fn setup() -> (SqliteMessageRepository, UserId, UserId, tempfile::TempDir) {
        let (pool, dir) = test_pool().await;
        let users = SqliteUserRepository::new(pool.clone());
        let alice = users.create_user("alice", "h").await.unwrap().id;
        let bob = users.create_user("bob", "h").await.unwrap().id;
        (SqliteMessageRepository::new(pool), alice, bob, dir)
    }

    #[tokio::test]
    async fn test_append_and_read_in_order() {
        let (repo, alice, _, _dir) = setup().await;

        let first = repo.append_message(&alice, MessageRole::User, "hello").await.unwrap();
        let second = repo
            .append_message(&alice, MessageRole::Assistant, "hi there")
            .await
            .unwrap();
        assert!(first.seq < second.seq);

        let all = repo.all_messages(&alice).await.unwrap();
        let contents: Vec<&str> = all.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["hello", "hi there"]);
        assert_eq!(all[1].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_recent_messages_window_oldest_first() {
        let (repo, alice, _, _dir) = setup().await;

        for i in 0..10 {
            let role = if i % 2 == 0 { MessageRole::User } else { MessageRole::Assistant };
            repo.append_message(&alice, role, &format!("m{i}")).await.unwrap();
        }

        let recent = repo.recent_messages(&alice, 4).await.unwrap();
        let contents: Vec<&str> = recent.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["m6", "m7", "m8", "m9"]);

        let all = repo.recent_messages(&alice, 50).await.unwrap();
        assert_eq!(all.len(), 10);
        assert_eq!(all[0].content, "m0");
    }

    #[tokio::test]
    async fn test_transcripts_are_per_user() {
        let (repo, alice, bob, _dir) = setup().await;

        repo.append_message(&alice, MessageRole::User, "from alice").await.unwrap();
        repo.append_message(&bob, MessageRole::User, "from bob").await.unwrap();

        let alice_msgs = repo.all_messages(&alice).await.unwrap();
        assert_eq!(alice_msgs.len(), 1);
        assert_eq!(alice_msgs[0].content, "from alice");

        assert_eq!(repo.clear_messages(&alice).await.unwrap(), 1);
        assert!(repo.all_messages(&alice).await.unwrap().is_empty());
        assert_eq!(repo.all_messages(&bob).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_insertion_order_wins_over_timestamps() {
        let (repo, alice, _, _dir) = setup().await;

        // Later rows carry earlier timestamps, as after a clock step backwards
        // or when a slower append read the clock first.
        for (content, created_at) in [
            ("first", "2026-01-01T00:00:03.000000Z"),
            ("second", "2026-01-01T00:00:02.000000Z"),
            ("third", "2026-01-01T00:00:01.000000Z"),
        ] {
            sqlx::query(
                "INSERT INTO messages (user_id, role, content, created_at) VALUES (?, 'user', ?, ?)",
            )
            .bind(alice.to_string())
            .bind(content)
            .bind(created_at)
            .execute(&repo.pool.writer)
            .await
            .unwrap();
        }

        let all = repo.all_messages(&alice).await.unwrap();
        let contents: Vec<&str> = all.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);

        let recent = repo.recent_messages(&alice, 2).await.unwrap();
        let contents: Vec<&str> = recent.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["second", "third"]);
    }

    #[tokio::test]
    async fn test_append_for_unknown_user_fails() {
        let (repo, _, _, _dir) = setup().await;
        let result = repo.append_message(&UserId::new(), MessageRole::User, "x").await;
        assert!(result.is_err());
    }
}
