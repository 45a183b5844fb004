//! Chatbot configuration and registry types.
//!
//! A `Chatbot` belongs to exactly one business and carries an embedded
//! `ChatbotConfig` value object. Config changes are full replacements,
//! never field-level patches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::account::BusinessId;

/// Unique identifier for a chatbot, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatbotId(pub Uuid);

impl ChatbotId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ChatbotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChatbotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChatbotId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Widget placement corner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetPosition {
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

impl fmt::Display for WidgetPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetPosition::BottomRight => write!(f, "bottom-right"),
            WidgetPosition::BottomLeft => write!(f, "bottom-left"),
            WidgetPosition::TopRight => write!(f, "top-right"),
            WidgetPosition::TopLeft => write!(f, "top-left"),
        }
    }
}

impl FromStr for WidgetPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bottom-right" => Ok(WidgetPosition::BottomRight),
            "bottom-left" => Ok(WidgetPosition::BottomLeft),
            "top-right" => Ok(WidgetPosition::TopRight),
            "top-left" => Ok(WidgetPosition::TopLeft),
            other => Err(format!("invalid widget position: '{other}'")),
        }
    }
}

impl Default for WidgetPosition {
    fn default() -> Self {
        WidgetPosition::BottomRight
    }
}

/// Configuration for a chatbot: prompt, generation parameters, display options.
///
/// Pure value object. Defaults mirror the product defaults a freshly created
/// chatbot ships with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatbotConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default)]
    pub position: WidgetPosition,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_system_prompt() -> String {
    "You are a helpful assistant for a service business.".to_string()
}

fn default_welcome_message() -> String {
    "Hello! How can I help you today?".to_string()
}

fn default_primary_color() -> String {
    "#646cff".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    500
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            system_prompt: default_system_prompt(),
            welcome_message: default_welcome_message(),
            primary_color: default_primary_color(),
            position: WidgetPosition::default(),
            enabled: default_enabled(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// A chatbot owned by a business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chatbot {
    pub id: ChatbotId,
    pub business_id: BusinessId,
    pub config: ChatbotConfig,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_roundtrip() {
        for pos in [
            WidgetPosition::BottomRight,
            WidgetPosition::BottomLeft,
            WidgetPosition::TopRight,
            WidgetPosition::TopLeft,
        ] {
            let parsed: WidgetPosition = pos.to_string().parse().unwrap();
            assert_eq!(pos, parsed);
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = ChatbotConfig::default();
        assert!(config.enabled);
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.max_tokens, 500);
        assert_eq!(config.position, WidgetPosition::BottomRight);
    }

    #[test]
    fn test_config_deserializes_sparse_payload() {
        // A widget setup form may send only a name; everything else defaults.
        let config: ChatbotConfig = serde_json::from_str(r#"{"name": "Support"}"#).unwrap();
        assert_eq!(config.name, "Support");
        assert_eq!(config.primary_color, "#646cff");
        assert!(config.enabled);
    }

    #[test]
    fn test_position_serde_kebab_case() {
        let json = serde_json::to_string(&WidgetPosition::BottomLeft).unwrap();
        assert_eq!(json, "\"bottom-left\"");
    }
}
