//! SessionLedger trait definition.
//!
//! The ledger persists one append-only transcript per session id. The
//! append primitive takes a whole exchange (user turn + assistant turn)
//! and must apply it atomically: concurrent appends to the same session
//! may interleave exchanges but never lose messages.

use botdesk_types::chat::{ChatMessage, ChatSession};
use botdesk_types::chatbot::ChatbotId;
use botdesk_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for chat session transcripts.
pub trait SessionLedger: Send + Sync {
    /// Load a session with its full ordered transcript. None if never seen.
    fn get_session(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// Append one user/assistant exchange, creating the session on first use.
    ///
    /// On creation the session records created_at and chatbot_id once;
    /// subsequent appends only bump updated_at.
    fn append_exchange(
        &self,
        session_id: &Uuid,
        chatbot_id: &ChatbotId,
        user_message: &ChatMessage,
        assistant_message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
