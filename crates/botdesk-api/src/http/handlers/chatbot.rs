//! Chatbot registry handlers (dashboard, session-cookie auth).
//!
//! Every operation is scoped to the authenticated business; a chatbot id
//! belonging to another tenant behaves exactly like a missing one.

use axum::Json;
use axum::extract::{Path, State};

use botdesk_types::chatbot::{Chatbot, ChatbotConfig, ChatbotId};

use crate::http::error::AppError;
use crate::http::extractors::AuthedBusiness;
use crate::state::AppState;

/// GET /api/business/chatbots - List the business's chatbots.
pub async fn list_chatbots(
    State(state): State<AppState>,
    AuthedBusiness(business): AuthedBusiness,
) -> Result<Json<Vec<Chatbot>>, AppError> {
    let chatbots = state.chatbot_service.list(&business.id).await?;
    Ok(Json(chatbots))
}

/// POST /api/business/chatbots - Create a chatbot.
pub async fn create_chatbot(
    State(state): State<AppState>,
    AuthedBusiness(business): AuthedBusiness,
    Json(config): Json<ChatbotConfig>,
) -> Result<Json<Chatbot>, AppError> {
    let chatbot = state.chatbot_service.create(business.id, config).await?;
    Ok(Json(chatbot))
}

/// GET /api/business/chatbots/:id - Fetch one chatbot.
pub async fn get_chatbot(
    State(state): State<AppState>,
    AuthedBusiness(business): AuthedBusiness,
    Path(chatbot_id): Path<ChatbotId>,
) -> Result<Json<Chatbot>, AppError> {
    let chatbot = state.chatbot_service.get(&business.id, &chatbot_id).await?;
    Ok(Json(chatbot))
}

/// PUT /api/business/chatbots/:id - Replace a chatbot's config.
pub async fn update_chatbot(
    State(state): State<AppState>,
    AuthedBusiness(business): AuthedBusiness,
    Path(chatbot_id): Path<ChatbotId>,
    Json(config): Json<ChatbotConfig>,
) -> Result<Json<Chatbot>, AppError> {
    let chatbot = state
        .chatbot_service
        .replace_config(&business.id, &chatbot_id, config)
        .await?;
    Ok(Json(chatbot))
}
