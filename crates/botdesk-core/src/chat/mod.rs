//! Conversation orchestration.

pub mod orchestrator;

pub use orchestrator::ConversationService;
