//! Registration, login, and profile handlers for businesses and end users.
//!
//! Successful registration and login both establish a session by setting
//! the token cookie; logout clears it. Profile routes echo the stored
//! account (the password hash never serializes).

use axum::Json;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse};

use botdesk_types::account::{LoginRequest, RegisterBusinessRequest, RegisterUserRequest};

use crate::http::cookie::{clear_session_cookie, session_cookie};
use crate::http::error::AppError;
use crate::http::extractors::{AuthedBusiness, AuthedUser};
use crate::state::AppState;

/// POST /api/business/register - Register a business and log it in.
pub async fn register_business(
    State(state): State<AppState>,
    Json(body): Json<RegisterBusinessRequest>,
) -> Result<impl IntoResponse, AppError> {
    let business = state.account_service.register_business(body).await?;
    let token = state.tokens.issue(&business.username)?;

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&token))]),
        Json(business),
    ))
}

/// POST /api/business/login - Verify credentials and establish a session.
pub async fn login_business(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let business = state.account_service.login_business(&body).await?;
    let token = state.tokens.issue(&business.username)?;

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&token))]),
        Json(business),
    ))
}

/// GET /api/business/me - Current business profile (includes api_key).
pub async fn current_business(
    AuthedBusiness(business): AuthedBusiness,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(business))
}

/// POST /register - Register an end-user account and log it in.
pub async fn register_user(
    State(state): State<AppState>,
    Json(body): Json<RegisterUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.account_service.register_user(body).await?;
    let token = state.tokens.issue(&user.username)?;

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&token))]),
        Json(user),
    ))
}

/// POST /login - Verify end-user credentials and establish a session.
pub async fn login_user(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.account_service.login_user(&body).await?;
    let token = state.tokens.issue(&user.username)?;

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&token))]),
        Json(user),
    ))
}

/// GET /api/user - Current end-user profile.
pub async fn current_user(AuthedUser(user): AuthedUser) -> Result<impl IntoResponse, AppError> {
    Ok(Json(user))
}

/// POST /logout - Clear the session cookie.
///
/// Stateless: the token itself is not revoked, the cookie is just dropped.
pub async fn logout() -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Json(serde_json::json!({ "message": "Logged out" })),
    )
}
