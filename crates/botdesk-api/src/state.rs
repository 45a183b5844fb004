//! Application state wiring all services together.
//!
//! Services are generic over repository/provider/hasher traits; AppState
//! pins them to the concrete infra implementations.

use std::sync::Arc;

use botdesk_core::chat::ConversationService;
use botdesk_core::service::account::AccountService;
use botdesk_core::service::chatbot::ChatbotService;
use botdesk_infra::config::Settings;
use botdesk_infra::crypto::{Argon2PasswordHasher, JwtIssuer};
use botdesk_infra::llm::OpenAiChatProvider;
use botdesk_infra::sqlite::{
    DatabasePool, SqliteBusinessRepository, SqliteChatbotRepository, SqliteSessionLedger,
    SqliteUserRepository,
};

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteAccountService =
    AccountService<SqliteBusinessRepository, SqliteUserRepository, Argon2PasswordHasher>;

pub type ConcreteChatbotService = ChatbotService<SqliteChatbotRepository>;

pub type ConcreteConversationService =
    ConversationService<SqliteChatbotRepository, SqliteSessionLedger, OpenAiChatProvider>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<ConcreteAccountService>,
    pub chatbot_service: Arc<ConcreteChatbotService>,
    pub conversation_service: Arc<ConcreteConversationService>,
    pub tokens: Arc<JwtIssuer>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to DB, wire services.
    pub async fn init(settings: Settings) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&settings.data_dir).await?;

        let db_pool = DatabasePool::new(&settings.database_url()).await?;

        let account_service = AccountService::new(
            SqliteBusinessRepository::new(db_pool.clone()),
            SqliteUserRepository::new(db_pool.clone()),
            Argon2PasswordHasher,
        );

        let chatbot_service = ChatbotService::new(SqliteChatbotRepository::new(db_pool.clone()));

        let provider = OpenAiChatProvider::new(
            &settings.openai_api_key,
            settings.openai_base_url.as_deref(),
        );
        let conversation_service = ConversationService::new(
            SqliteChatbotRepository::new(db_pool.clone()),
            SqliteSessionLedger::new(db_pool.clone()),
            provider,
        );

        let tokens = JwtIssuer::new(&settings.jwt_secret);

        Ok(Self {
            account_service: Arc::new(account_service),
            chatbot_service: Arc::new(chatbot_service),
            conversation_service: Arc::new(conversation_service),
            tokens: Arc::new(tokens),
            db_pool,
        })
    }
}
