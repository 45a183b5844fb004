//! Process configuration loaded from the environment.

use secrecy::SecretString;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Runtime settings for the server process.
///
/// Secrets are wrapped in `SecretString` so they never appear in Debug
/// output or logs.
pub struct Settings {
    /// Bind address, e.g. `127.0.0.1`.
    pub host: String,
    pub port: u16,
    /// Directory holding the SQLite database.
    pub data_dir: String,
    /// HMAC key for session token signing.
    pub jwt_secret: SecretString,
    /// API key for the OpenAI-compatible generation provider.
    pub openai_api_key: SecretString,
    /// Optional base URL override for OpenAI-compatible gateways.
    pub openai_base_url: Option<String>,
}

impl Settings {
    /// Load settings from the environment.
    ///
    /// `BOTDESK_JWT_SECRET` and `OPENAI_API_KEY` are required; everything
    /// else has a local-development default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = require("BOTDESK_JWT_SECRET")?;
        let openai_api_key = require("OPENAI_API_KEY")?;

        let host = std::env::var("BOTDESK_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = match std::env::var("BOTDESK_PORT") {
            Ok(raw) => raw.parse().map_err(|e| ConfigError::Invalid {
                name: "BOTDESK_PORT",
                message: format!("{e}"),
            })?,
            Err(_) => 8787,
        };

        let data_dir = std::env::var("BOTDESK_DATA_DIR").unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            format!("{home}/.botdesk")
        });

        let openai_base_url = std::env::var("OPENAI_BASE_URL").ok();

        Ok(Self {
            host,
            port,
            data_dir,
            jwt_secret: SecretString::from(jwt_secret),
            openai_api_key: SecretString::from(openai_api_key),
            openai_base_url,
        })
    }

    /// SQLite URL for the database under `data_dir`.
    pub fn database_url(&self) -> String {
        format!("sqlite://{}/botdesk.db?mode=rwc", self.data_dir)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}
