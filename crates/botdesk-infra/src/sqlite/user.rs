//! SQLite end-user account repository implementation.

use botdesk_core::repository::UserRepository;
use botdesk_types::account::User;
use botdesk_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

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

    fn into_user(self) -> Result<User, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(User {
            id,
            username: self.username,
            password_hash: self.password_hash,
            created_at,
        })
    }
}

impl UserRepository for SqliteUserRepository {
    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO users (id, username, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(format_datetime(&user.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                RepositoryError::Conflict(db.message().to_string())
            }
            other => RepositoryError::Query(other.to_string()),
        })?;

        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let user_row =
                    UserRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(user_row.into_user()?))
            }
            None => Ok(None),
        }
    }

    async fn username_taken(&self, username: &str) -> Result<bool, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let count: i64 = row
            .try_get("cnt")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = SqliteUserRepository::new(test_pool().await);

        let user = User {
            id: Uuid::now_v7(),
            username: "visitor".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            created_at: Utc::now(),
        };
        repo.insert(&user).await.unwrap();

        let found = repo.find_by_username("visitor").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(repo.username_taken("visitor").await.unwrap());
        assert!(!repo.username_taken("ghost").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let repo = SqliteUserRepository::new(test_pool().await);

        let user = User {
            id: Uuid::now_v7(),
            username: "visitor".to_string(),
            password_hash: "h1".to_string(),
            created_at: Utc::now(),
        };
        repo.insert(&user).await.unwrap();

        let dup = User {
            id: Uuid::now_v7(),
            username: "visitor".to_string(),
            password_hash: "h2".to_string(),
            created_at: Utc::now(),
        };
        let err = repo.insert(&dup).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }
}
