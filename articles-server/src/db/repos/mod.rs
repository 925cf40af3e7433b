//! Repository implementations for article persistence
//!
//! One implementation per storage backend:
//! - [`PgArticleRepo`]: PostgreSQL via sqlx
//! - [`InMemoryArticleRepo`]: process-local map, same constraints

pub mod articles;
pub mod memory;

pub use articles::{ArticleRepository, DbError, PgArticleRepo};
pub use memory::InMemoryArticleRepo;
