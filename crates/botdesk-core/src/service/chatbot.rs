//! Chatbot registry service.
//!
//! Thin tenant-scoped CRUD over the ChatbotRepository. The business_id
//! always comes from a verified identity upstream; this service just keeps
//! the scoping contract visible in one place.

use botdesk_types::account::BusinessId;
use botdesk_types::chatbot::{Chatbot, ChatbotConfig, ChatbotId};
use botdesk_types::error::ChatbotError;
use chrono::Utc;
use tracing::info;

use crate::repository::ChatbotRepository;

pub struct ChatbotService<R: ChatbotRepository> {
    repo: R,
}

impl<R: ChatbotRepository> ChatbotService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a chatbot under the given business.
    pub async fn create(
        &self,
        business_id: BusinessId,
        config: ChatbotConfig,
    ) -> Result<Chatbot, ChatbotError> {
        let now = Utc::now();
        let chatbot = Chatbot {
            id: ChatbotId::new(),
            business_id,
            config,
            created_at: now,
            updated_at: now,
        };

        self.repo.create(&chatbot).await?;
        info!(chatbot_id = %chatbot.id, business_id = %business_id, "Chatbot created");
        Ok(chatbot)
    }

    pub async fn list(&self, business_id: &BusinessId) -> Result<Vec<Chatbot>, ChatbotError> {
        Ok(self.repo.list_for_business(business_id).await?)
    }

    /// Get a chatbot, scoped to its owning business.
    ///
    /// An id that exists under a different business is NotFound, never
    /// Forbidden: tenant existence must not leak.
    pub async fn get(
        &self,
        business_id: &BusinessId,
        chatbot_id: &ChatbotId,
    ) -> Result<Chatbot, ChatbotError> {
        self.repo
            .get(business_id, chatbot_id)
            .await?
            .ok_or(ChatbotError::NotFound)
    }

    /// Replace the config wholesale (the only mutation the registry allows).
    pub async fn replace_config(
        &self,
        business_id: &BusinessId,
        chatbot_id: &ChatbotId,
        config: ChatbotConfig,
    ) -> Result<Chatbot, ChatbotError> {
        let updated = self
            .repo
            .replace_config(business_id, chatbot_id, &config, Utc::now())
            .await?
            .ok_or(ChatbotError::NotFound)?;

        info!(chatbot_id = %chatbot_id, "Chatbot config replaced");
        Ok(updated)
    }
}
