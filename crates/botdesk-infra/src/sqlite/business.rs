//! SQLite business repository implementation.
//!
//! Implements `BusinessRepository` from `botdesk-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, writer for mutations.

use botdesk_core::repository::BusinessRepository;
use botdesk_types::account::{Business, BusinessId};
use botdesk_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `BusinessRepository`.
pub struct SqliteBusinessRepository {
    pool: DatabasePool,
}

impl SqliteBusinessRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Business.
struct BusinessRow {
    id: String,
    name: String,
    email: String,
    username: String,
    password_hash: String,
    api_key: String,
    created_at: String,
}

impl BusinessRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
            api_key: row.try_get("api_key")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_business(self) -> Result<Business, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid business id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(Business {
            id: BusinessId(id),
            name: self.name,
            email: self.email,
            username: self.username,
            password_hash: self.password_hash,
            api_key: self.api_key,
            created_at,
        })
    }
}

impl BusinessRepository for SqliteBusinessRepository {
    async fn insert(&self, business: &Business) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO businesses (id, name, email, username, password_hash, api_key, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(business.id.to_string())
        .bind(&business.name)
        .bind(&business.email)
        .bind(&business.username)
        .bind(&business.password_hash)
        .bind(&business.api_key)
        .bind(format_datetime(&business.created_at))
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

    async fn find_by_username(&self, username: &str) -> Result<Option<Business>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM businesses WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let business_row = BusinessRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(business_row.into_business()?))
            }
            None => Ok(None),
        }
    }

    async fn find_by_api_key(&self, api_key: &str) -> Result<Option<Business>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM businesses WHERE api_key = ?")
            .bind(api_key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let business_row = BusinessRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(business_row.into_business()?))
            }
            None => Ok(None),
        }
    }

    async fn username_or_email_taken(
        &self,
        username: &str,
        email: &str,
    ) -> Result<bool, RepositoryError> {
        let row =
            sqlx::query("SELECT COUNT(*) as cnt FROM businesses WHERE username = ? OR email = ?")
                .bind(username)
                .bind(email)
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
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_business(username: &str, email: &str) -> Business {
        Business {
            id: BusinessId::new(),
            name: "Acme Plumbing".to_string(),
            email: email.to_string(),
            username: username.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            api_key: format!("sk_{username}"),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_by_username() {
        let repo = SqliteBusinessRepository::new(test_pool().await);

        let business = make_business("acme", "a@acme.test");
        repo.insert(&business).await.unwrap();

        let found = repo.find_by_username("acme").await.unwrap().unwrap();
        assert_eq!(found.id, business.id);
        assert_eq!(found.email, "a@acme.test");
        assert_eq!(found.password_hash, "$argon2id$fake");

        assert!(repo.find_by_username("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_api_key() {
        let repo = SqliteBusinessRepository::new(test_pool().await);

        let business = make_business("acme", "a@acme.test");
        repo.insert(&business).await.unwrap();

        let found = repo.find_by_api_key("sk_acme").await.unwrap().unwrap();
        assert_eq!(found.id, business.id);

        assert!(repo.find_by_api_key("sk_bogus").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_username_or_email_taken() {
        let repo = SqliteBusinessRepository::new(test_pool().await);

        let business = make_business("acme", "a@acme.test");
        repo.insert(&business).await.unwrap();

        assert!(repo
            .username_or_email_taken("acme", "other@acme.test")
            .await
            .unwrap());
        assert!(repo
            .username_or_email_taken("other", "a@acme.test")
            .await
            .unwrap());
        assert!(!repo
            .username_or_email_taken("other", "other@acme.test")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let repo = SqliteBusinessRepository::new(test_pool().await);

        repo.insert(&make_business("acme", "a@acme.test"))
            .await
            .unwrap();

        let mut dup = make_business("acme", "b@acme.test");
        dup.api_key = "sk_other".to_string();
        let err = repo.insert(&dup).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }
}
