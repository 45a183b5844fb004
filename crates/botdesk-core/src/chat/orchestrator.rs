//! Conversation orchestrator: context assembly, delegation, persistence.
//!
//! The one component with a real correctness contract:
//! - the context window is [system prompt, prior transcript in original
//!   order, new user message];
//! - nothing is persisted until the provider call succeeds, so a failed
//!   generation leaves the transcript byte-identical;
//! - session identity is continuous: a caller-supplied session_id resumes
//!   its transcript, an absent one mints a fresh id.

use botdesk_types::account::BusinessId;
use botdesk_types::chat::{ChatMessage, ChatRequest, ChatResponse, ChatRole};
use botdesk_types::chatbot::{ChatbotConfig, ChatbotId};
use botdesk_types::error::ChatError;
use botdesk_types::llm::{GenerationRequest, Message, MessageRole};
use tracing::{debug, info};
use uuid::Uuid;

use crate::llm::GenerationProvider;
use crate::repository::{ChatbotRepository, SessionLedger};

/// Handles one public chat exchange end to end.
///
/// Holds no per-session state in memory: the ledger is the only source of
/// conversational continuity.
pub struct ConversationService<C, L, P>
where
    C: ChatbotRepository,
    L: SessionLedger,
    P: GenerationProvider,
{
    chatbots: C,
    ledger: L,
    provider: P,
}

impl<C, L, P> ConversationService<C, L, P>
where
    C: ChatbotRepository,
    L: SessionLedger,
    P: GenerationProvider,
{
    pub fn new(chatbots: C, ledger: L, provider: P) -> Self {
        Self {
            chatbots,
            ledger,
            provider,
        }
    }

    /// Process one widget message for a chatbot owned by `business_id`.
    ///
    /// `business_id` must come from a verified identity (api_key lookup);
    /// the chatbot resolution is scoped by it, so another tenant's
    /// chatbot_id fails as NotFound without leaking existence.
    pub async fn chat(
        &self,
        business_id: &BusinessId,
        chatbot_id: &ChatbotId,
        request: ChatRequest,
    ) -> Result<ChatResponse, ChatError> {
        let chatbot = self
            .chatbots
            .get(business_id, chatbot_id)
            .await?
            .ok_or(ChatError::ChatbotNotFound)?;

        if !chatbot.config.enabled {
            return Err(ChatError::ChatbotDisabled);
        }

        let session_id = request.session_id.unwrap_or_else(Uuid::new_v4);

        let transcript = self
            .ledger
            .get_session(&session_id)
            .await?
            .map(|s| s.messages)
            .unwrap_or_default();

        debug!(
            session_id = %session_id,
            chatbot_id = %chatbot_id,
            prior_messages = transcript.len(),
            "Assembling context window"
        );

        let generation_request =
            build_generation_request(&chatbot.config, &transcript, &request.message);

        // External-failure boundary: no transcript write happens until the
        // provider has produced the full exchange.
        let generated = self.provider.generate(&generation_request).await?;

        let user_message = ChatMessage::now(ChatRole::User, request.message);
        let assistant_message = ChatMessage::now(ChatRole::Assistant, generated.content.clone());

        self.ledger
            .append_exchange(&session_id, chatbot_id, &user_message, &assistant_message)
            .await?;

        info!(
            session_id = %session_id,
            chatbot_id = %chatbot_id,
            provider = self.provider.name(),
            "Exchange persisted"
        );

        Ok(ChatResponse {
            message: generated.content,
            session_id,
        })
    }
}

/// Assemble the ordered context window for one generation call.
///
/// The system prompt travels in the dedicated system slot, the prior
/// transcript keeps its original order, and the new user message goes last.
fn build_generation_request(
    config: &ChatbotConfig,
    transcript: &[ChatMessage],
    user_message: &str,
) -> GenerationRequest {
    let mut messages: Vec<Message> = Vec::with_capacity(transcript.len() + 1);

    for entry in transcript {
        let role = match entry.role {
            ChatRole::User => MessageRole::User,
            ChatRole::Assistant => MessageRole::Assistant,
        };
        messages.push(Message {
            role,
            content: entry.content.clone(),
        });
    }

    messages.push(Message {
        role: MessageRole::User,
        content: user_message.to_string(),
    });

    GenerationRequest {
        model: config.model.clone(),
        messages,
        system: Some(config.system_prompt.clone()),
        max_tokens: config.max_tokens,
        temperature: Some(config.temperature),
    }
}
