//! Axum-based HTTP gateway for the chat widget.
//!
//! Body size and request time are bounded by tower layers; everything that is
//! not an API route falls through to the configured static directory.

mod handlers;

use handlers::{handle_chat, handle_clear_session, handle_health};

use crate::chat::ChatService;
use crate::config::Config;
use anyhow::{Context, Result};
use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::timeout::TimeoutLayer;

/// Maximum request body size (64KB)
pub const MAX_BODY_SIZE: usize = 65_536;
/// Request timeout. Longer than the provider timeout so provider failures
/// surface as `processing_failed` rather than a bare 408.
pub const REQUEST_TIMEOUT_SECS: u64 = 90;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
}

/// `POST /chat` body
#[derive(Debug, serde::Deserialize)]
pub struct ChatBody {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default, rename = "sessionId")]
    pub session_id: Option<String>,
}

/// `POST /session/clear` body
#[derive(Debug, serde::Deserialize)]
pub struct ClearSessionBody {
    #[serde(default, rename = "sessionId")]
    pub session_id: Option<String>,
}

fn is_public_bind(host: &str) -> bool {
    !matches!(
        host,
        "127.0.0.1" | "localhost" | "::1" | "[::1]" | "0:0:0:0:0:0:0:1"
    )
}

/// Bind `host:port` and serve until the process stops.
pub async fn run_gateway(host: &str, port: u16, config: Config) -> Result<()> {
    if is_public_bind(host) && !config.gateway.allow_public_bind {
        anyhow::bail!(
            "Refusing to bind to {host}: the gateway has no authentication.\n\
             Fix: use --host 127.0.0.1 (default) or set\n\
             [gateway] allow_public_bind = true in config.toml."
        );
    }

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .context("parse gateway bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("bind gateway socket")?;

    run_gateway_with_listener(host, listener, config).await
}

/// Run the HTTP gateway from a pre-bound listener.
pub async fn run_gateway_with_listener(
    host: &str,
    listener: tokio::net::TcpListener,
    config: Config,
) -> Result<()> {
    let actual_port = listener
        .local_addr()
        .context("get gateway listener local address")?
        .port();
    let display_addr = format!("{host}:{actual_port}");

    let chat = Arc::new(ChatService::from_config(&config)?);
    let static_dir = config.static_dir();

    println!("◆ CryptoBrain listening on http://{display_addr}");
    println!("  POST /chat          → ask a question");
    println!("  POST /session/clear → forget a session");
    println!("  GET  /health        → health check");
    if static_dir.is_dir() {
        println!("  GET  /*             → {}", static_dir.display());
    }
    println!("  Press Ctrl+C to stop.\n");

    tracing::info!(
        addr = %display_addr,
        provider = chat.provider_name(),
        mode = %chat.settings().mode,
        store = chat.store().name(),
        "gateway started"
    );

    let app = build_router(AppState { chat }, &static_dir, config.gateway.cors);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("gateway server error")?;

    Ok(())
}

/// Assemble routes, static hosting and the tower layers.
pub fn build_router(state: AppState, static_dir: &Path, cors: bool) -> Router {
    let mut app = Router::new()
        .route("/health", get(handle_health))
        .route("/chat", post(handle_chat))
        .route("/session/clear", post(handle_clear_session))
        .with_state(state);

    if static_dir.is_dir() {
        let index = ServeFile::new(static_dir.join("index.html"));
        app = app.fallback_service(ServeDir::new(static_dir).fallback(index));
    } else {
        tracing::debug!(dir = %static_dir.display(), "static dir missing, widget not served");
    }

    let app = app
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        ));

    if cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {error}");
        std::future::pending::<()>().await;
    }
    tracing::info!("gateway shutting down");
}
