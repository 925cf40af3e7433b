//! In-memory article repository
//!
//! Mirrors the PostgreSQL constraints (unique title, storage-assigned ids)
//! under a single lock. Used by tests and `articles serve --in-memory`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{ArticleRepository, DbError};
use crate::models::{Article, ArticleDraft};

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Article>,
    last_id: i64,
}

impl Table {
    fn title_taken(&self, title: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|a| a.title == title && Some(a.id) != except)
    }
}

/// Process-local article store
#[derive(Default)]
pub struct InMemoryArticleRepo {
    table: RwLock<Table>,
}

impl InMemoryArticleRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepo {
    async fn fetch(&self) -> Result<Vec<Article>, DbError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Article>, DbError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn get_by_title(&self, title: &str) -> Result<Option<Article>, DbError> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|a| a.title == title).cloned())
    }

    async fn store(&self, draft: &ArticleDraft) -> Result<Article, DbError> {
        let mut table = self.table.write().await;
        if table.title_taken(draft.title(), None) {
            return Err(DbError::Conflict {
                title: draft.title().to_owned(),
            });
        }

        table.last_id += 1;
        let now = Utc::now();
        let article = Article {
            id: table.last_id,
            title: draft.title().to_owned(),
            content: draft.content().to_owned(),
            updated_at: now,
            created_at: now,
        };
        table.rows.insert(article.id, article.clone());

        Ok(article)
    }

    async fn update(&self, article: &Article) -> Result<Option<Article>, DbError> {
        let mut table = self.table.write().await;
        // Same order as `UPDATE ... WHERE id`: no row, no constraint check.
        if !table.rows.contains_key(&article.id) {
            return Ok(None);
        }

        if table.title_taken(&article.title, Some(article.id)) {
            return Err(DbError::Conflict {
                title: article.title.clone(),
            });
        }

        let Some(row) = table.rows.get_mut(&article.id) else {
            return Ok(None);
        };
        row.title = article.title.clone();
        row.content = article.content.clone();
        row.updated_at = article.updated_at;

        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, DbError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), DbError> {
        let _table = self.table.read().await;
        Ok(())
    }
}
