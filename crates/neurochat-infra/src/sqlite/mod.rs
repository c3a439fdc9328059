//! SQLite storage layer.
//!
//! Repository implementations backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod message;
pub mod pool;
pub mod session;
pub mod user;

use chrono::{DateTime, SecondsFormat, Utc};
use neurochat_types::error::RepositoryError;
use neurochat_types::user::UserId;

/// Map a sqlx error, turning unique-constraint violations into `Conflict`.
pub(crate) fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            RepositoryError::Conflict(db_err.message().to_string())
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Connection
        }
        _ => RepositoryError::Query(e.to_string()),
    }
}

pub(crate) fn parse_user_id(s: &str) -> Result<UserId, RepositoryError> {
    s.parse()
        .map(UserId)
        .map_err(|e| RepositoryError::Query(format!("invalid UUID: {e}")))
}

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Fixed microsecond precision keeps stored timestamps lexicographically sortable.
pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::pool::DatabasePool;

    /// Fresh migrated database in a temp directory. Keep the guard alive.
    pub async fn test_pool() -> (DatabasePool, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (pool, dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime_sorts_lexicographically() {
        let a = DateTime::parse_from_rfc3339("2026-01-01T10:00:00.5Z")
            .unwrap()
            .with_timezone(&Utc);
        let b = DateTime::parse_from_rfc3339("2026-01-01T10:00:00.123456Z")
            .unwrap()
            .with_timezone(&Utc);
        let c = DateTime::parse_from_rfc3339("2026-01-01T10:00:01Z")
            .unwrap()
            .with_timezone(&Utc);
        let (fa, fb, fc) = (format_datetime(&a), format_datetime(&b), format_datetime(&c));
        assert_eq!(fa, "2026-01-01T10:00:00.500000Z");
        assert!(fb < fa && fa < fc);
        assert_eq!(parse_datetime(&fa).unwrap(), a);
    }
}
