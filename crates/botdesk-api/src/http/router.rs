//! Axum router configuration with middleware.
//!
//! Three route groups:
//! - end-user session routes at the root (`/register`, `/login`, `/logout`)
//! - business dashboard routes under `/api/business` (session cookie auth)
//! - the public widget chat route under `/api/chat` (api key auth)

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // End-user accounts
        .route("/register", post(handlers::account::register_user))
        .route("/login", post(handlers::account::login_user))
        .route("/logout", post(handlers::account::logout))
        .route("/api/user", get(handlers::account::current_user))
        // Business accounts
        .route(
            "/api/business/register",
            post(handlers::account::register_business),
        )
        .route(
            "/api/business/login",
            post(handlers::account::login_business),
        )
        .route("/api/business/me", get(handlers::account::current_business))
        // Chatbot registry
        .route(
            "/api/business/chatbots",
            get(handlers::chatbot::list_chatbots).post(handlers::chatbot::create_chatbot),
        )
        .route(
            "/api/business/chatbots/{id}",
            get(handlers::chatbot::get_chatbot),
        )
        .route(
            "/api/business/chatbots/{id}",
            put(handlers::chatbot::update_chatbot),
        )
        // Public widget chat
        .route("/api/chat/{chatbot_id}", post(handlers::chat::chat))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
