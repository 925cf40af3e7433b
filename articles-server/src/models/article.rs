//! Article entity and validated draft input

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for article titles (matches the VARCHAR(255) column)
pub const MAX_TITLE_LEN: usize = 255;

/// Persisted article record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Validated title + content, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    title: String,
    content: String,
}

impl ArticleDraft {
    /// Validate user-supplied fields.
    ///
    /// # Rules
    /// - `title` and `content` must contain a non-whitespace character
    /// - `title` is at most 255 characters
    /// - neither field contains a NUL character
    ///
    /// # Example
    /// ```
    /// use articles_server::models::ArticleDraft;
    ///
    /// assert!(ArticleDraft::new("Hello", "World").is_ok());
    /// assert!(ArticleDraft::new("", "World").is_err());
    /// assert!(ArticleDraft::new("Hello", "   ").is_err());
    /// ```
    pub fn new(title: &str, content: &str) -> Result<Self, ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }

        if title.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }

        if title.contains('\0') {
            return Err(ValidationError::InvalidCharacter { field: "title" });
        }

        if content.trim().is_empty() {
            return Err(ValidationError::Empty { field: "content" });
        }

        if content.contains('\0') {
            return Err(ValidationError::InvalidCharacter { field: "content" });
        }

        Ok(Self {
            title: title.to_owned(),
            content: content.to_owned(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Article {
    /// Replace title and content with a validated draft, keeping identity
    /// and timestamps.
    pub fn apply(mut self, draft: ArticleDraft) -> Self {
        self.title = draft.title;
        self.content = draft.content;
        self
    }
}
