//! Core services.

pub mod account;
pub mod chatbot;
pub mod hash;
