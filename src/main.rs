//! Chat widget server
//!
//! Serves a small embeddable chat widget and relays each visitor message,
//! together with the conversation so far, to the Gemini API.

mod api;
mod config;
mod conversation;
mod reply;
mod session;
mod system_prompt;

use api::{create_router, AppState};
use config::ChatConfig;
use reply::{GeminiReplyClient, LoggingReplyClient};
use session::SessionManager;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const EVICTION_PERIOD: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_widget=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = ChatConfig::from_env()?;

    // Initialize reply client
    let gemini = Arc::new(GeminiReplyClient::new(&config.gemini));
    let client = Arc::new(LoggingReplyClient::new(gemini));
    tracing::info!(
        model = %config.gemini.model,
        api_base = %config.gemini.api_base,
        "Reply client initialized"
    );

    // Create application state
    let sessions = Arc::new(SessionManager::new(
        client,
        &config.instructions,
        config.welcome_message,
    ));
    sessions.start_eviction_task(config.session_ttl, EVICTION_PERIOD);
    tracing::info!(ttl_secs = config.session_ttl.as_secs(), "Idle session eviction started");
    let state = AppState::new(sessions);

    // The widget is embedded in third-party pages
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new().gzip(true).br(true).deflate(true);

    let app = create_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(compression),
    );

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Chat widget server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
