//! Generation provider implementations.

pub mod openai_compat;

pub use openai_compat::OpenAiChatProvider;
