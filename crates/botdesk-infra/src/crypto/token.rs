//! Session token issuance and validation.
//!
//! Tokens carry only the username claim. Lifetime is enforced by the cookie
//! Max-Age, not an `exp` claim, so validation disables expiry checking and
//! requires no registered claims.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use botdesk_types::error::AuthError;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(default)]
    username: String,
}

/// Signs and verifies HS256 session tokens.
#[derive(Clone)]
pub struct JwtIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtIssuer {
    pub fn new(secret: &SecretString) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
        }
    }

    /// Issue a token asserting the given username.
    pub fn issue(&self, username: &str) -> Result<String, AuthError> {
        let claims = Claims {
            username: username.to_string(),
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::Invalid)
    }

    /// Verify a token and return the username it asserts.
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        let mut validation = Validation::default();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AuthError::Malformed)?;

        if data.claims.username.is_empty() {
            return Err(AuthError::Invalid);
        }
        Ok(data.claims.username)
    }
}
