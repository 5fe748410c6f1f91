//! Hintgen · Math hint generation backend
//!
//! - Axum HTTP API for tutor sessions (default)
//! - Interactive console flow with `--console`
//! - Optional OpenAI integration (via environment variables)
//!
//! Important env variables:
//!   PORT                : u16 (default 3000)
//!   OPENAI_API_KEY      : enables hints and model-assisted checks if present
//!   OPENAI_BASE_URL     : default "https://api.openai.com/v1"
//!   OPENAI_FAST_MODEL   : default "gpt-3.5-turbo" (answer classification)
//!   OPENAI_STRONG_MODEL : default "gpt-4" (hints)
//!   AGENT_CONFIG_PATH   : path to TOML config (question bank + decoding overrides)
//!   SESSIONS_DIR        : where finished sessions are written (default "./sessions")
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use hintgen_backend::routes::build_router;
use hintgen_backend::state::AppState;
use hintgen_backend::{console, telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
  telemetry::init_tracing();

  // Shared application state (question bank, profiles, live sessions, OpenAI client).
  let state = Arc::new(AppState::from_env());

  if std::env::args().skip(1).any(|a| a == "--console") {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    console::run(&state, stdin, tokio::io::stdout()).await?;
    return Ok(());
  }

  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "hintgen", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "hintgen", live_sessions = state.sessions.read().await.len(), "Server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "hintgen", error = %e, "Failed to listen for shutdown signal");
  }
}
