//! Article repository
//!
//! Handles article CRUD with proper patterns:
//! - store/update: unique violation on title becomes `DbError::Conflict`
//! - delete: single conditional DELETE, reports whether a row was removed
//! - lookups: `fetch_optional`, absence is `None`

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Article, ArticleDraft};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("article with title '{title}' already exists")]
    Conflict { title: String },
}

/// Persistence contract for articles.
///
/// Deadlines are enforced by the caller dropping the returned future.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// All articles, ordered by id.
    async fn fetch(&self) -> Result<Vec<Article>, DbError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Article>, DbError>;

    /// Exact-match lookup.
    async fn get_by_title(&self, title: &str) -> Result<Option<Article>, DbError>;

    /// Insert a new row, returning it with the assigned id and timestamps.
    async fn store(&self, draft: &ArticleDraft) -> Result<Article, DbError>;

    /// Persist title, content and `updated_at`. `None` if no row has this id.
    async fn update(&self, article: &Article) -> Result<Option<Article>, DbError>;

    /// Returns `true` if a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, DbError>;

    /// Cheap round trip proving the backend answers.
    async fn ping(&self) -> Result<(), DbError>;
}

/// PostgreSQL article repository
#[derive(Clone)]
pub struct PgArticleRepo {
    pool: PgPool,
}

impl PgArticleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a write error, turning unique violations on title into conflicts.
fn write_error(err: sqlx::Error, title: &str) -> DbError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => DbError::Conflict {
            title: title.to_owned(),
        },
        _ => DbError::Sqlx(err),
    }
}

#[async_trait]
impl ArticleRepository for PgArticleRepo {
    async fn fetch(&self) -> Result<Vec<Article>, DbError> {
        let articles: Vec<Article> = sqlx::query_as(
            r#"
            SELECT id, title, content, updated_at, created_at
            FROM article
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(articles)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Article>, DbError> {
        let article: Option<Article> = sqlx::query_as(
            r#"
            SELECT id, title, content, updated_at, created_at
            FROM article
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(article)
    }

    async fn get_by_title(&self, title: &str) -> Result<Option<Article>, DbError> {
        let article: Option<Article> = sqlx::query_as(
            r#"
            SELECT id, title, content, updated_at, created_at
            FROM article
            WHERE title = $1
            "#,
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(article)
    }

    async fn store(&self, draft: &ArticleDraft) -> Result<Article, DbError> {
        sqlx::query_as(
            r#"
            INSERT INTO article (title, content)
            VALUES ($1, $2)
            RETURNING id, title, content, updated_at, created_at
            "#,
        )
        .bind(draft.title())
        .bind(draft.content())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, draft.title()))
    }

    async fn update(&self, article: &Article) -> Result<Option<Article>, DbError> {
        sqlx::query_as(
            r#"
            UPDATE article
            SET title = $2, content = $3, updated_at = $4
            WHERE id = $1
            RETURNING id, title, content, updated_at, created_at
            "#,
        )
        .bind(article.id)
        .bind(&article.title)
        .bind(&article.content)
        .bind(article.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, &article.title))
    }

    async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM article WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
