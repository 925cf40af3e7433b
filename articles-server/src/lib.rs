//! articles-server: REST backend for a single "article" resource
//!
//! Requests flow through three layers:
//! - [`http`]: axum handlers, input parsing, status mapping
//! - [`service`]: business rules and per-call deadlines
//! - [`db`]: repository trait with PostgreSQL and in-memory backends

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod service;

pub use config::{AppConfig, DatabaseConfig};
pub use service::{ArticleError, ArticleService};
