//! Application error type mapping to HTTP status codes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use botdesk_types::error::{AccountError, AuthError, ChatError, ChatbotError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Auth(AuthError),
    Account(AccountError),
    Chatbot(ChatbotError),
    Chat(ChatError),
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl From<AccountError> for AppError {
    fn from(e: AccountError) -> Self {
        AppError::Account(e)
    }
}

impl From<ChatbotError> for AppError {
    fn from(e: ChatbotError) -> Self {
        AppError::Chatbot(e)
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Auth(e) => (StatusCode::UNAUTHORIZED, e.to_string()),
            // Duplicate registration is a client error, surfaced as 400 so
            // the signup form treats it like any other validation failure.
            AppError::Account(AccountError::Conflict) => (
                StatusCode::BAD_REQUEST,
                "Username or email already registered".to_string(),
            ),
            AppError::Account(AccountError::InvalidCredentials) => (
                StatusCode::UNAUTHORIZED,
                "Invalid username or password".to_string(),
            ),
            AppError::Account(AccountError::NotFound) => {
                (StatusCode::NOT_FOUND, "Account not found".to_string())
            }
            AppError::Account(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Chatbot(ChatbotError::NotFound) => {
                (StatusCode::NOT_FOUND, "Chatbot not found".to_string())
            }
            AppError::Chatbot(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Chat(ChatError::ChatbotNotFound) => {
                (StatusCode::NOT_FOUND, "Chatbot not found".to_string())
            }
            AppError::Chat(ChatError::ChatbotDisabled) => {
                (StatusCode::FORBIDDEN, "Chatbot is disabled".to_string())
            }
            AppError::Chat(ChatError::Provider(e)) => (StatusCode::BAD_GATEWAY, e.to_string()),
            AppError::Chat(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        if status.is_server_error() {
            tracing::error!(%status, %message, "Request failed");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use botdesk_types::llm::LlmError;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(AppError::Auth(AuthError::Missing)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Account(AccountError::Conflict)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Account(AccountError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Chatbot(ChatbotError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Chat(ChatError::ChatbotDisabled)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(AppError::Chat(ChatError::Provider(LlmError::RateLimited))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
