//! ChatbotRepository trait definition.
//!
//! Every read and write is scoped by (chatbot_id, business_id). A chatbot_id
//! alone is never sufficient for access: an id that exists under a different
//! business resolves to None exactly like an unknown id.

use botdesk_types::account::BusinessId;
use botdesk_types::chatbot::{Chatbot, ChatbotConfig, ChatbotId};
use botdesk_types::error::RepositoryError;
use chrono::{DateTime, Utc};

/// Repository trait for the tenant-scoped chatbot registry.
pub trait ChatbotRepository: Send + Sync {
    fn create(
        &self,
        chatbot: &Chatbot,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List all chatbots for a business, oldest first.
    fn list_for_business(
        &self,
        business_id: &BusinessId,
    ) -> impl std::future::Future<Output = Result<Vec<Chatbot>, RepositoryError>> + Send;

    fn get(
        &self,
        business_id: &BusinessId,
        chatbot_id: &ChatbotId,
    ) -> impl std::future::Future<Output = Result<Option<Chatbot>, RepositoryError>> + Send;

    /// Replace the embedded config wholesale and bump updated_at.
    ///
    /// Returns None when the (id, business_id) pair does not match a row.
    fn replace_config(
        &self,
        business_id: &BusinessId,
        chatbot_id: &ChatbotId,
        config: &ChatbotConfig,
        updated_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Option<Chatbot>, RepositoryError>> + Send;
}
