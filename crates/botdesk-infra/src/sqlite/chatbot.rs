//! SQLite chatbot registry implementation.
//!
//! The embedded `ChatbotConfig` is flattened into columns on the `chatbots`
//! table and reassembled on read. Every query is scoped by both chatbot id
//! and business id so tenant isolation is enforced at the SQL level.

use botdesk_core::repository::ChatbotRepository;
use botdesk_types::account::BusinessId;
use botdesk_types::chatbot::{Chatbot, ChatbotConfig, ChatbotId, WidgetPosition};
use botdesk_types::error::RepositoryError;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `ChatbotRepository`.
pub struct SqliteChatbotRepository {
    pool: DatabasePool,
}

impl SqliteChatbotRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Chatbot.
struct ChatbotRow {
    id: String,
    business_id: String,
    name: String,
    description: Option<String>,
    system_prompt: String,
    welcome_message: String,
    primary_color: String,
    position: String,
    enabled: i64,
    model: String,
    temperature: f64,
    max_tokens: i64,
    created_at: String,
    updated_at: String,
}

impl ChatbotRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            business_id: row.try_get("business_id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            system_prompt: row.try_get("system_prompt")?,
            welcome_message: row.try_get("welcome_message")?,
            primary_color: row.try_get("primary_color")?,
            position: row.try_get("position")?,
            enabled: row.try_get("enabled")?,
            model: row.try_get("model")?,
            temperature: row.try_get("temperature")?,
            max_tokens: row.try_get("max_tokens")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_chatbot(self) -> Result<Chatbot, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid chatbot id: {e}")))?;
        let business_id = Uuid::parse_str(&self.business_id)
            .map_err(|e| RepositoryError::Query(format!("invalid business_id: {e}")))?;
        let position: WidgetPosition = self
            .position
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let created_at = parse_datetime(&self.created_at)?;
        let updated_at = parse_datetime(&self.updated_at)?;

        Ok(Chatbot {
            id: ChatbotId(id),
            business_id: BusinessId(business_id),
            config: ChatbotConfig {
                name: self.name,
                description: self.description,
                system_prompt: self.system_prompt,
                welcome_message: self.welcome_message,
                primary_color: self.primary_color,
                position,
                enabled: self.enabled != 0,
                model: self.model,
                temperature: self.temperature,
                max_tokens: self.max_tokens as u32,
            },
            created_at,
            updated_at,
        })
    }
}

impl ChatbotRepository for SqliteChatbotRepository {
    async fn create(&self, chatbot: &Chatbot) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO chatbots (id, business_id, name, description, system_prompt, welcome_message, primary_color, position, enabled, model, temperature, max_tokens, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(chatbot.id.to_string())
        .bind(chatbot.business_id.to_string())
        .bind(&chatbot.config.name)
        .bind(&chatbot.config.description)
        .bind(&chatbot.config.system_prompt)
        .bind(&chatbot.config.welcome_message)
        .bind(&chatbot.config.primary_color)
        .bind(chatbot.config.position.to_string())
        .bind(chatbot.config.enabled as i64)
        .bind(&chatbot.config.model)
        .bind(chatbot.config.temperature)
        .bind(chatbot.config.max_tokens as i64)
        .bind(format_datetime(&chatbot.created_at))
        .bind(format_datetime(&chatbot.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list_for_business(
        &self,
        business_id: &BusinessId,
    ) -> Result<Vec<Chatbot>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM chatbots WHERE business_id = ? ORDER BY created_at ASC")
            .bind(business_id.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut chatbots = Vec::with_capacity(rows.len());
        for row in &rows {
            let chatbot_row =
                ChatbotRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            chatbots.push(chatbot_row.into_chatbot()?);
        }

        Ok(chatbots)
    }

    async fn get(
        &self,
        business_id: &BusinessId,
        chatbot_id: &ChatbotId,
    ) -> Result<Option<Chatbot>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chatbots WHERE id = ? AND business_id = ?")
            .bind(chatbot_id.to_string())
            .bind(business_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let chatbot_row =
                    ChatbotRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(chatbot_row.into_chatbot()?))
            }
            None => Ok(None),
        }
    }

    async fn replace_config(
        &self,
        business_id: &BusinessId,
        chatbot_id: &ChatbotId,
        config: &ChatbotConfig,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Chatbot>, RepositoryError> {
        let result = sqlx::query(
            r#"UPDATE chatbots
               SET name = ?, description = ?, system_prompt = ?, welcome_message = ?,
                   primary_color = ?, position = ?, enabled = ?, model = ?,
                   temperature = ?, max_tokens = ?, updated_at = ?
               WHERE id = ? AND business_id = ?"#,
        )
        .bind(&config.name)
        .bind(&config.description)
        .bind(&config.system_prompt)
        .bind(&config.welcome_message)
        .bind(&config.primary_color)
        .bind(config.position.to_string())
        .bind(config.enabled as i64)
        .bind(&config.model)
        .bind(config.temperature)
        .bind(config.max_tokens as i64)
        .bind(format_datetime(&updated_at))
        .bind(chatbot_id.to_string())
        .bind(business_id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get(business_id, chatbot_id).await
    }
}
