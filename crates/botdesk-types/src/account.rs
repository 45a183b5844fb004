//! Business and end-user account types.
//!
//! A `Business` is the tenant: it owns chatbots and holds the api_key that
//! grants access to the public chat endpoint. A `User` is a plain end-user
//! account with the same cookie-session auth flow but no api_key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Unique identifier for a business, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusinessId(pub Uuid);

impl BusinessId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for BusinessId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BusinessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BusinessId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A registered service business (tenant).
///
/// The password hash is never serialized: API handlers return this struct
/// directly and rely on the `skip_serializing` attribute to strip it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub id: BusinessId,
    pub name: String,
    pub email: String,
    pub username: String,
    /// Argon2id PHC-format hash. Never leaves the process.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Widget embedding key, unique per business, minted at registration.
    pub api_key: String,
    pub created_at: DateTime<Utc>,
}

/// A registered end-user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for `POST /api/business/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterBusinessRequest {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Payload for `POST /register` (end-user accounts).
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
}

/// Payload for both login endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_id_roundtrip() {
        let id = BusinessId::new();
        let parsed: BusinessId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let business = Business {
            id: BusinessId::new(),
            name: "Acme Plumbing".to_string(),
            email: "owner@acme.test".to_string(),
            username: "acme".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            api_key: "sk_abc".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&business).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password_hash"));
        assert!(json.contains("sk_abc"));
    }

    #[test]
    fn test_user_hash_never_serialized() {
        let user = User {
            id: Uuid::now_v7(),
            username: "visitor".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
    }
}
