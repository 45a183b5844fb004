//! Route handlers.

pub mod account;
pub mod chat;
pub mod chatbot;
