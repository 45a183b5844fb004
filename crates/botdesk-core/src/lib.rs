//! Business logic for Botdesk.
//!
//! This crate defines the repository traits the SQLite layer implements,
//! the account and chatbot registry services, and the conversation
//! orchestrator. It never depends on botdesk-infra: all I/O goes through
//! traits so tests can substitute in-memory fakes.

pub mod chat;
pub mod llm;
pub mod repository;
pub mod service;
