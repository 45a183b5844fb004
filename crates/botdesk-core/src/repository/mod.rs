//! Repository trait definitions.
//!
//! Implementations live in botdesk-infra. All traits use native async fn
//! in traits (RPITIT, Rust 2024 edition).

pub mod account;
pub mod chatbot;
pub mod session;

pub use account::{BusinessRepository, UserRepository};
pub use chatbot::ChatbotRepository;
pub use session::SessionLedger;
