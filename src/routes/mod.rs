//! Router assembly: HTTP endpoints, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - REST-ish API under `/api/v1/...`
/// - CORS (allow any origin/method/headers); adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/questions", get(http::http_list_questions))
        .route("/api/v1/questions/:id", get(http::http_get_question))
        .route("/api/v1/check", post(http::http_post_check))
        .route("/api/v1/sessions", post(http::http_create_session))
        .route("/api/v1/sessions/:id", get(http::http_get_session))
        .route("/api/v1/sessions/:id/pre_hint", post(http::http_post_pre_hint))
        .route("/api/v1/sessions/:id/hint", post(http::http_post_hint))
        .route("/api/v1/sessions/:id/post_hint", post(http::http_post_post_hint))
        .route("/api/v1/sessions/:id/finish", post(http::http_post_finish))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
