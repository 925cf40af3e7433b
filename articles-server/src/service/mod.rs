//! Article use-case service
//!
//! # Responsibility
//! - Apply business rules (unique titles, delete/update must hit a row).
//! - Bound every operation by the configured deadline.
//! - Keep the HTTP layer decoupled from storage details.

pub mod articles;
pub mod error;

pub use articles::ArticleService;
pub use error::ArticleError;
