//! Article endpoints, nested under `/v1`
//!
//! Every handler emits exactly one log event with `status_code` and
//! `start_time`, plus `error_details` when the request fails.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;

use crate::http::error::ApiError;
use crate::http::extractors::{ArticleBody, ArticleId};
use crate::http::server::AppState;
use crate::models::Article;

/// Per-request outcome logger
struct RequestLog {
    action: &'static str,
    start_time: i64,
}

impl RequestLog {
    fn start(action: &'static str) -> Self {
        Self {
            action,
            start_time: Utc::now().timestamp(),
        }
    }

    fn success(&self, status: StatusCode) {
        tracing::info!(
            status_code = status.as_u16(),
            start_time = self.start_time,
            action = self.action,
            "request completed"
        );
    }

    fn failure(&self, err: impl Into<ApiError>) -> ApiError {
        let err = err.into();
        tracing::error!(
            status_code = err.status().as_u16(),
            start_time = self.start_time,
            action = self.action,
            error_details = %err,
            "request failed"
        );
        err
    }
}

/// GET /v1/articles - list all articles
async fn fetch_articles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let log = RequestLog::start("fetch articles");
    let articles = state.articles.fetch().await.map_err(|e| log.failure(e))?;

    log.success(StatusCode::OK);
    Ok(Json(articles))
}

/// GET /v1/articles/{id} - get a single article
async fn get_article(
    State(state): State<Arc<AppState>>,
    id: Result<ArticleId, ApiError>,
) -> Result<Json<Article>, ApiError> {
    let log = RequestLog::start("get article by id");
    let ArticleId(id) = id.map_err(|e| log.failure(e))?;
    let article = state.articles.get_by_id(id).await.map_err(|e| log.failure(e))?;

    log.success(StatusCode::OK);
    Ok(Json(article))
}

/// POST /v1/articles - create an article
async fn store_article(
    State(state): State<Arc<AppState>>,
    body: Result<ArticleBody, ApiError>,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    let log = RequestLog::start("store article");
    let ArticleBody(draft) = body.map_err(|e| log.failure(e))?;
    let article = state.articles.store(draft).await.map_err(|e| log.failure(e))?;

    log.success(StatusCode::CREATED);
    Ok((StatusCode::CREATED, Json(article)))
}

/// PUT /v1/articles/{id} - replace title and content
async fn update_article(
    State(state): State<Arc<AppState>>,
    id: Result<ArticleId, ApiError>,
    body: Result<ArticleBody, ApiError>,
) -> Result<Json<Article>, ApiError> {
    let log = RequestLog::start("update article");
    let ArticleId(id) = id.map_err(|e| log.failure(e))?;
    let ArticleBody(draft) = body.map_err(|e| log.failure(e))?;
    let article = state
        .articles
        .update(id, draft)
        .await
        .map_err(|e| log.failure(e))?;

    log.success(StatusCode::OK);
    Ok(Json(article))
}

/// DELETE /v1/articles/{id} - remove an article
async fn delete_article(
    State(state): State<Arc<AppState>>,
    id: Result<ArticleId, ApiError>,
) -> Result<StatusCode, ApiError> {
    let log = RequestLog::start("delete article");
    let ArticleId(id) = id.map_err(|e| log.failure(e))?;
    state.articles.delete(id).await.map_err(|e| log.failure(e))?;

    log.success(StatusCode::NO_CONTENT);
    Ok(StatusCode::NO_CONTENT)
}

/// Article routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/articles", get(fetch_articles).post(store_article))
        .route(
            "/articles/{id}",
            get(get_article).put(update_article).delete(delete_article),
        )
}
