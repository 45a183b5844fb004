//! Authentication extractors.
//!
//! Dashboard routes authenticate via the session cookie (JWT, verified and
//! resolved back to the stored account). The public chat route authenticates
//! via the `X-API-Key` header, which resolves directly to a business.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use botdesk_types::account::{Business, User};
use botdesk_types::error::AuthError;

use crate::http::cookie::SESSION_COOKIE;
use crate::http::error::AppError;
use crate::state::AppState;

/// Business resolved from a verified session cookie.
pub struct AuthedBusiness(pub Business);

impl FromRequestParts<AppState> for AuthedBusiness {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts)?;
        let username = state.tokens.verify(&token)?;

        // A verified token whose identity no longer resolves is a missing
        // account (404), not an auth failure.
        let business = state
            .account_service
            .get_business(&username)
            .await
            .map_err(AppError::Account)?;

        Ok(AuthedBusiness(business))
    }
}

/// End-user account resolved from a verified session cookie.
pub struct AuthedUser(pub User);

impl FromRequestParts<AppState> for AuthedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts)?;
        let username = state.tokens.verify(&token)?;

        let user = state
            .account_service
            .get_user(&username)
            .await
            .map_err(AppError::Account)?;

        Ok(AuthedUser(user))
    }
}

/// Business resolved from an `X-API-Key` header (widget embedding).
pub struct ApiKeyBusiness(pub Business);

impl FromRequestParts<AppState> for ApiKeyBusiness {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let api_key = parts
            .headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(AppError::Auth(AuthError::Missing))?;

        let business = state
            .account_service
            .resolve_by_api_key(api_key)
            .await
            .map_err(AppError::Account)?
            .ok_or(AppError::Auth(AuthError::Invalid))?;

        Ok(ApiKeyBusiness(business))
    }
}

/// Pull the session token out of the Cookie header.
fn session_token(parts: &Parts) -> Result<String, AppError> {
    let header = parts
        .headers
        .get("cookie")
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Auth(AuthError::Missing))?;

    for pair in header.split(';') {
        let pair = pair.trim();
        if let Some(value) = pair.strip_prefix(SESSION_COOKIE) {
            if let Some(token) = value.strip_prefix('=') {
                if !token.is_empty() {
                    return Ok(token.to_string());
                }
            }
        }
    }

    Err(AppError::Auth(AuthError::Missing))
}
