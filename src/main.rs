mod application;
mod config;
mod domain;
mod infrastructure;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::application::handlers::rate_handler;
use crate::application::services::rating_service::RatingService;
use crate::config::AppConfig;
use crate::infrastructure::feedback::GeminiFeedbackClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reputa=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    info!("Reputation scoring server starting...");
    info!("Supported platforms: facebook, instagram, tiktok, x");

    let mut service = RatingService::new(config.engine());
    match &config.google_api_key {
        Some(api_key) => {
            match GeminiFeedbackClient::new(api_key, &config.text_model, &config.preprompt_path) {
                Ok(client) => {
                    info!(model = %config.text_model, "Narrative feedback enabled");
                    service = service.with_feedback(Arc::new(client));
                }
                Err(e) => {
                    warn!("Feedback client unavailable, serving scores only: {}", e);
                }
            }
        }
        None => info!("GOOGLE_API_KEY not set, serving scores only"),
    }
    let service = Arc::new(service);

    let app = Router::new()
        .route("/", get(|| async { "Reputation scoring server is running!" }))
        .route("/health", get(health_check))
        .route("/rate", post(rate_handler::rate))
        .with_state(service);

    let addr = SocketAddr::from((config.host, config.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let server = axum::serve(listener, app);

    let shutdown_signal = async move {
        let ctrl_c = async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received Ctrl+C signal"),
                Err(e) => error!("Failed to install Ctrl+C handler: {}", e),
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut sig) => {
                    sig.recv().await;
                    info!("Received SIGTERM signal");
                }
                Err(e) => error!("Failed to install SIGTERM handler: {}", e),
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }
    };

    info!("Server started successfully. Press Ctrl+C to stop.");
    server.with_graceful_shutdown(shutdown_signal).await?;

    info!("Server shutting down gracefully...");
    Ok(())
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "running" }))
}
