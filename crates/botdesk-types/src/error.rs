use thiserror::Error;

use crate::llm::LlmError;

/// Errors from token verification and credential extraction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No credential was presented at all.
    #[error("not authenticated")]
    Missing,

    /// The token's signature or structure did not verify.
    #[error("invalid token")]
    Malformed,

    /// The token verified but carries no usable identity claim.
    #[error("invalid token")]
    Invalid,
}

/// Errors from account registration, login, and identity resolution.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("username or email already exists")]
    Conflict,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account not found")]
    NotFound,

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

/// Errors from chatbot registry operations.
#[derive(Debug, Error)]
pub enum ChatbotError {
    /// Also returned when the id exists under a different business, so
    /// tenant existence never leaks.
    #[error("chatbot not found")]
    NotFound,

    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

/// Errors from the conversation orchestrator.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chatbot not found")]
    ChatbotNotFound,

    #[error("chatbot is disabled")]
    ChatbotDisabled,

    #[error(transparent)]
    Provider(#[from] LlmError),

    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

/// Errors from repository operations (used by trait definitions in botdesk-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display_is_opaque() {
        // Malformed and Invalid must be indistinguishable to the caller.
        assert_eq!(AuthError::Malformed.to_string(), AuthError::Invalid.to_string());
    }

    #[test]
    fn test_chat_error_wraps_provider() {
        let err: ChatError = LlmError::RateLimited.into();
        assert!(matches!(err, ChatError::Provider(LlmError::RateLimited)));
    }

    #[test]
    fn test_account_error_display() {
        assert_eq!(
            AccountError::Conflict.to_string(),
            "username or email already exists"
        );
    }
}
