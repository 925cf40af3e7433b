//! Domain models with validation at construction
//!
//! User input becomes an [`ArticleDraft`] only after validation.
//! Invalid input returns ValidationError, not panic.

pub mod article;
pub mod validation;

pub use article::{Article, ArticleDraft, MAX_TITLE_LEN};
pub use validation::ValidationError;
