//! Shared domain types for Botdesk.
//!
//! This crate holds the data shapes exchanged between core services,
//! infrastructure implementations, and the HTTP layer. It has no
//! dependencies on any other Botdesk crate.

pub mod account;
pub mod chat;
pub mod chatbot;
pub mod error;
pub mod llm;
