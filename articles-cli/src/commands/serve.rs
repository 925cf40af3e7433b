//! HTTP server command
//!
//! Builds an [`AppConfig`] from flags / environment and runs the server.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use articles_server::config::DEFAULT_TIMEOUT;
use articles_server::db::pool::DEFAULT_MAX_CONNECTIONS;
use articles_server::http::{run_server, AppState};
use articles_server::{AppConfig, DatabaseConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "BIND_ADDR", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Database host
    #[arg(long, env = "DB_HOST", default_value = "127.0.0.1")]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database user
    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", default_value = "", hide_env_values = true)]
    pub db_password: String,

    /// Database name
    #[arg(long, env = "DB_NAME", default_value = "articles")]
    pub db_name: String,

    /// Maximum pooled database connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Per-request service timeout in seconds (0 fails every call)
    #[arg(long, env = "TIMEOUT", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Keep articles in memory instead of PostgreSQL
    #[arg(long)]
    pub in_memory: bool,
}

impl ServeArgs {
    /// Assemble the application configuration.
    pub fn config(&self) -> AppConfig {
        AppConfig {
            database: DatabaseConfig {
                host: self.db_host.clone(),
                port: self.db_port,
                username: self.db_user.clone(),
                password: self.db_password.clone(),
                database: self.db_name.clone(),
                max_connections: self.max_connections,
            },
            timeout: Duration::from_secs(self.timeout),
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.config();
    tracing::info!(database = ?config.database, "Starting articles server on {}", config.bind_addr);

    let state = if args.in_memory {
        tracing::warn!("Using in-memory storage - articles are lost on exit");
        AppState::in_memory(&config)
    } else {
        AppState::postgres(&config)
            .await
            .context("Failed to connect to database")?
    };

    // Run server (blocks until shutdown)
    run_server(state, &config).await.context("Server error")?;

    Ok(())
}
