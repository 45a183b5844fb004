//! Public chat handler (widget, api-key auth).

use axum::Json;
use axum::extract::{Path, State};

use botdesk_types::chat::{ChatRequest, ChatResponse};
use botdesk_types::chatbot::ChatbotId;

use crate::http::error::AppError;
use crate::http::extractors::ApiKeyBusiness;
use crate::state::AppState;

/// POST /api/chat/:chatbot_id - Exchange one message with a chatbot.
///
/// The acting business comes from the api key, never from the request body,
/// so the chatbot lookup is tenant-scoped by construction.
pub async fn chat(
    State(state): State<AppState>,
    ApiKeyBusiness(business): ApiKeyBusiness,
    Path(chatbot_id): Path<ChatbotId>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let response = state
        .conversation_service
        .chat(&business.id, &chatbot_id, body)
        .await?;
    Ok(Json(response))
}
