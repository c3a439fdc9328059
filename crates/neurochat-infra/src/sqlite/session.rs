//! SQLite session repository implementation.

use chrono::Utc;
use neurochat_core::repository::session::SessionRepository;
use neurochat_types::error::RepositoryError;
use neurochat_types::user::UserId;

use super::pool::DatabasePool;
use super::{format_datetime, map_sqlx_error, parse_user_id};

/// SQLite-backed implementation of `SessionRepository`.
#[derive(Clone)]
pub struct SqliteSessionRepository {
    pool: DatabasePool,
}

impl SqliteSessionRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl SessionRepository for SqliteSessionRepository {
    async fn create_session(&self, token_hash: &str, user_id: &UserId) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO sessions (token_hash, user_id, created_at) VALUES (?, ?, ?)")
            .bind(token_hash)
            .bind(user_id.to_string())
            .bind(format_datetime(&Utc::now()))
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn find_session(&self, token_hash: &str) -> Result<Option<UserId>, RepositoryError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT user_id FROM sessions WHERE token_hash = ?")
                .bind(token_hash)
                .fetch_optional(&self.pool.reader)
                .await
                .map_err(map_sqlx_error)?;

        row.map(|(id,)| parse_user_id(&id)).transpose()
    }

    async fn delete_session(&self, token_hash: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
            .bind(token_hash)
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}
