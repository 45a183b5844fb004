//! Request extractors for authenticated identities.

pub mod auth;

pub use auth::{ApiKeyBusiness, AuthedBusiness, AuthedUser};
