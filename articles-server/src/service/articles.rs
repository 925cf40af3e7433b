//! Article service - business rules and deadlines
//!
//! # Invariants
//! - Every repository call made by one operation shares one deadline.
//! - A zero timeout means the deadline has already passed.
//! - Title uniqueness is ultimately enforced by storage; the lookup in
//!   [`ArticleService::store`] only answers the common case early.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::Instant;

use super::ArticleError;
use crate::db::{ArticleRepository, DbError};
use crate::models::{Article, ArticleDraft};

/// Use-case service wrapping an article repository.
#[derive(Clone)]
pub struct ArticleService {
    repo: Arc<dyn ArticleRepository>,
    timeout: Duration,
}

impl ArticleService {
    pub fn new(repo: Arc<dyn ArticleRepository>, timeout: Duration) -> Self {
        Self { repo, timeout }
    }

    /// Deadline for an operation starting now. `None` if the timeout is too
    /// large to represent.
    fn deadline(&self) -> Option<Instant> {
        Instant::now().checked_add(self.timeout)
    }

    /// Run one repository call under `deadline`.
    async fn within<T, F>(deadline: Option<Instant>, call: F) -> Result<T, ArticleError>
    where
        F: Future<Output = Result<T, DbError>>,
    {
        let Some(deadline) = deadline else {
            return call.await.map_err(ArticleError::from);
        };

        if Instant::now() >= deadline {
            tracing::warn!("deadline elapsed before repository call");
            return Err(ArticleError::deadline_exceeded());
        }

        match tokio::time::timeout_at(deadline, call).await {
            Ok(result) => result.map_err(ArticleError::from),
            Err(_) => {
                tracing::warn!("repository call exceeded deadline");
                Err(ArticleError::deadline_exceeded())
            }
        }
    }

    /// List every article.
    pub async fn fetch(&self) -> Result<Vec<Article>, ArticleError> {
        Self::within(self.deadline(), self.repo.fetch()).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Article, ArticleError> {
        Self::within(self.deadline(), self.repo.get_by_id(id))
            .await?
            .ok_or_else(|| ArticleError::article_not_found(id))
    }

    pub async fn get_by_title(&self, title: &str) -> Result<Article, ArticleError> {
        Self::within(self.deadline(), self.repo.get_by_title(title))
            .await?
            .ok_or_else(|| ArticleError::NotFound(format!("article titled '{}'", title)))
    }

    /// Create an article unless one with the same title exists.
    pub async fn store(&self, draft: ArticleDraft) -> Result<Article, ArticleError> {
        let deadline = self.deadline();

        let existing = Self::within(deadline, self.repo.get_by_title(draft.title())).await?;
        if let Some(existing) = existing {
            tracing::debug!(id = existing.id, "title already taken");
            return Err(DbError::Conflict {
                title: existing.title,
            }
            .into());
        }

        let article = Self::within(deadline, self.repo.store(&draft)).await?;
        tracing::debug!(id = article.id, "article stored");
        Ok(article)
    }

    /// Replace title and content of an existing article.
    ///
    /// `updated_at` is stamped here; `created_at` is preserved.
    pub async fn update(&self, id: i64, draft: ArticleDraft) -> Result<Article, ArticleError> {
        let deadline = self.deadline();

        let current = Self::within(deadline, self.repo.get_by_id(id))
            .await?
            .ok_or_else(|| ArticleError::article_not_found(id))?;

        let mut article = current.apply(draft);
        article.updated_at = Utc::now();

        // The row can vanish between the lookup and the write.
        Self::within(deadline, self.repo.update(&article))
            .await?
            .ok_or_else(|| ArticleError::article_not_found(id))
    }

    /// Check that storage answers within the deadline.
    pub async fn ping(&self) -> Result<(), ArticleError> {
        Self::within(self.deadline(), self.repo.ping()).await
    }

    /// Remove an article; fails with `NotFound` if no row had this id.
    pub async fn delete(&self, id: i64) -> Result<(), ArticleError> {
        if Self::within(self.deadline(), self.repo.delete(id)).await? {
            tracing::debug!(id, "article deleted");
            Ok(())
        } else {
            Err(ArticleError::article_not_found(id))
        }
    }
}
