//! SQLite user repository implementation.

use chrono::Utc;
use neurochat_core::repository::user::UserRepository;
use neurochat_types::error::RepositoryError;
use neurochat_types::user::{User, UserCredentials, UserId};
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, map_sqlx_error, parse_datetime, parse_user_id};

/// SQLite-backed implementation of `UserRepository`.
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct UserRow {
    id: String,
    username: String,
    password_hash: String,
    created_at: String,
}

impl UserRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_credentials(self) -> Result<UserCredentials, RepositoryError> {
        Ok(UserCredentials {
            user: User {
                id: parse_user_id(&self.id)?,
                username: self.username,
                created_at: parse_datetime(&self.created_at)?,
            },
            password_hash: self.password_hash,
        })
    }
}

impl SqliteUserRepository {
    async fn fetch_one_where(
        &self,
        column: &str,
        value: String,
    ) -> Result<Option<UserCredentials>, RepositoryError> {
        let sql = format!(
            "SELECT id, username, password_hash, created_at FROM users WHERE {column} = ?"
        );
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?;

        row.map(|r| {
            UserRow::from_row(&r)
                .map_err(|e| RepositoryError::Query(e.to_string()))?
                .into_credentials()
        })
        .transpose()
    }
}

impl UserRepository for SqliteUserRepository {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, RepositoryError> {
        let user = User {
            id: UserId::new(),
            username: username.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO users (id, username, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(password_hash)
        .bind(format_datetime(&user.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx_error)?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserCredentials>, RepositoryError> {
        self.fetch_one_where("username", username.to_string()).await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .fetch_one_where("id", id.to_string())
            .await?
            .map(|c| c.user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::test_support::test_pool;

    #[tokio::test]
    async fn test_create_and_find_user() {
        let (pool, _dir) = test_pool().await;
        let repo = SqliteUserRepository::new(pool);

        let user = repo.create_user("alice", "$argon2id$stub").await.unwrap();

        let creds = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(creds.user.id, user.id);
        assert_eq!(creds.password_hash, "$argon2id$stub");

        let found = repo.find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(found.username, "alice");
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let (pool, _dir) = test_pool().await;
        let repo = SqliteUserRepository::new(pool);

        repo.create_user("alice", "h1").await.unwrap();
        let err = repo.create_user("alice", "h2").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_find_missing_user() {
        let (pool, _dir) = test_pool().await;
        let repo = SqliteUserRepository::new(pool);

        assert!(repo.find_by_username("ghost").await.unwrap().is_none());
        assert!(repo.find_by_id(&UserId::new()).await.unwrap().is_none());
    }
}
