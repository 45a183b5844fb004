//! SQLite persistence: split read/write pool and repository implementations.

pub mod business;
pub mod chatbot;
pub mod pool;
pub mod session;
pub mod user;

pub use business::SqliteBusinessRepository;
pub use chatbot::SqliteChatbotRepository;
pub use pool::DatabasePool;
pub use session::SqliteSessionLedger;
pub use user::SqliteUserRepository;

use botdesk_types::error::RepositoryError;
use chrono::{DateTime, Utc};

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
