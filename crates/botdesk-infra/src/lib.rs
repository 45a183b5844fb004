//! Infrastructure layer: SQLite persistence, crypto, configuration, and the
//! OpenAI-compatible generation provider.

pub mod config;
pub mod crypto;
pub mod llm;
pub mod sqlite;
