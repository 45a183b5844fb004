//! GenerationProvider trait definition.
//!
//! This is the external-failure boundary of the system: the orchestrator
//! calls `generate` and persists nothing until it succeeds.

use botdesk_types::llm::{GenerationRequest, GenerationResponse, LlmError};

/// Trait for generation backends (OpenAI-compatible APIs and test fakes).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// The concrete implementation lives in botdesk-infra.
pub trait GenerationProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send an assembled context window and receive the generated reply.
    ///
    /// Implementations must enforce an explicit timeout and surface it as
    /// [`LlmError::Timeout`] rather than hanging the request.
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl std::future::Future<Output = Result<GenerationResponse, LlmError>> + Send;
}
