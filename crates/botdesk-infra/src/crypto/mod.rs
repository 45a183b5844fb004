//! Credential crypto: argon2id password hashing and JWT session tokens.

pub mod password;
pub mod token;

pub use password::Argon2PasswordHasher;
pub use token::JwtIssuer;
