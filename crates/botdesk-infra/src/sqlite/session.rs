//! SQLite session ledger implementation.
//!
//! A session row is created on first append and its `chatbot_id` is never
//! rewritten afterwards. The user/assistant pair of an exchange is written
//! inside one transaction, so a crash between the two inserts cannot leave
//! a dangling user turn. Transcript order is rowid order, which is insertion
//! order regardless of timestamp ties.

use botdesk_core::repository::SessionLedger;
use botdesk_types::chat::{ChatMessage, ChatRole, ChatSession};
use botdesk_types::chatbot::ChatbotId;
use botdesk_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `SessionLedger`.
pub struct SqliteSessionLedger {
    pool: DatabasePool,
}

impl SqliteSessionLedger {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct SessionRow {
    id: String,
    chatbot_id: String,
    created_at: String,
    updated_at: String,
}

impl SessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            chatbot_id: row.try_get("chatbot_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

struct MessageRow {
    role: String,
    content: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    /// Map to a domain message; rows with a role the domain does not know
    /// are skipped (returned as None) rather than failing the whole read.
    fn into_message(self) -> Result<Option<ChatMessage>, RepositoryError> {
        let role: ChatRole = match self.role.parse() {
            Ok(role) => role,
            Err(_) => {
                tracing::warn!(role = %self.role, "Skipping transcript row with unknown role");
                return Ok(None);
            }
        };
        let timestamp = parse_datetime(&self.created_at)?;

        Ok(Some(ChatMessage {
            role,
            content: self.content,
            timestamp,
        }))
    }
}

impl SessionLedger for SqliteSessionLedger {
    async fn get_session(&self, session_id: &Uuid) -> Result<Option<ChatSession>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chat_sessions WHERE id = ?")
            .bind(session_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let session_row =
            SessionRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;

        let chatbot_id = Uuid::parse_str(&session_row.chatbot_id)
            .map_err(|e| RepositoryError::Query(format!("invalid chatbot_id: {e}")))?;
        let created_at = parse_datetime(&session_row.created_at)?;
        let updated_at = parse_datetime(&session_row.updated_at)?;

        let message_rows =
            sqlx::query("SELECT * FROM chat_messages WHERE session_id = ? ORDER BY rowid ASC")
                .bind(session_id.to_string())
                .fetch_all(&self.pool.reader)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(message_rows.len());
        for row in &message_rows {
            let msg_row =
                MessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            if let Some(message) = msg_row.into_message()? {
                messages.push(message);
            }
        }

        Ok(Some(ChatSession {
            session_id: Uuid::parse_str(&session_row.id)
                .map_err(|e| RepositoryError::Query(format!("invalid session id: {e}")))?,
            chatbot_id: ChatbotId(chatbot_id),
            messages,
            created_at,
            updated_at,
        }))
    }

    async fn append_exchange(
        &self,
        session_id: &Uuid,
        chatbot_id: &ChatbotId,
        user_message: &ChatMessage,
        assistant_message: &ChatMessage,
    ) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let now = format_datetime(&assistant_message.timestamp);

        // First append creates the session row; later appends leave its
        // chatbot_id and created_at untouched.
        sqlx::query(
            "INSERT OR IGNORE INTO chat_sessions (id, chatbot_id, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(session_id.to_string())
        .bind(chatbot_id.to_string())
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        for message in [user_message, assistant_message] {
            sqlx::query(
                "INSERT INTO chat_messages (id, session_id, role, content, created_at) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(Uuid::now_v7().to_string())
            .bind(session_id.to_string())
            .bind(message.role.to_string())
            .bind(&message.content)
            .bind(format_datetime(&message.timestamp))
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        }

        sqlx::query("UPDATE chat_sessions SET updated_at = ? WHERE id = ?")
            .bind(&now)
            .bind(session_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}
