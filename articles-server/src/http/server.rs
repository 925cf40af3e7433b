//! Axum server setup
//!
//! Server skeleton with:
//! - Localhost-only CORS by default
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::config::AppConfig;
use crate::db::{self, InMemoryArticleRepo, PgArticleRepo};
use crate::service::ArticleService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub articles: ArticleService,
}

impl AppState {
    pub fn new(articles: ArticleService) -> Self {
        Self { articles }
    }

    /// Connect to PostgreSQL, ensure the schema exists and wire the service.
    pub async fn postgres(config: &AppConfig) -> Result<Self, sqlx::Error> {
        let pool = db::create_pool(&config.database).await?;
        db::migrations::run(&pool).await?;

        let repo = Arc::new(PgArticleRepo::new(pool));
        Ok(Self::new(ArticleService::new(repo, config.timeout)))
    }

    /// Process-local storage, nothing survives a restart.
    pub fn in_memory(config: &AppConfig) -> Self {
        let repo = Arc::new(InMemoryArticleRepo::new());
        Self::new(ArticleService::new(repo, config.timeout))
    }
}

/// Build the application router with all routes
pub fn build_router(state: AppState, config: &AppConfig) -> Router {
    let cors = if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin([
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("http://localhost:8080"),
                HeaderValue::from_static("http://127.0.0.1:3000"),
                HeaderValue::from_static("http://127.0.0.1:8080"),
            ])
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(routes::health::router())
        .nest("/v1", routes::articles::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// # Example
///
/// ```ignore
/// let state = AppState::postgres(&config).await?;
/// run_server(state, &config).await?;
/// ```
pub async fn run_server(state: AppState, config: &AppConfig) -> Result<(), ServerError> {
    let app = build_router(state, config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        timeout_ms = config.timeout.as_millis() as u64,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
