//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::Deserialize;

use super::error::ApiError;
use crate::models::ArticleDraft;
use crate::service::ArticleError;

/// Article id from the `{id}` path segment.
///
/// Anything that is not an integer cannot name an article, so it is
/// rejected as not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleId(pub i64);

impl<S> FromRequestParts<S> for ArticleId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ArticleError::NotFound("article id missing".into()))?;

        let id = raw
            .parse::<i64>()
            .map_err(|_| ArticleError::NotFound(format!("article '{}'", raw)))?;

        Ok(Self(id))
    }
}

/// Wire shape of a create/update body.
///
/// Missing fields decode as empty strings so they fail validation (400)
/// rather than decoding (422).
#[derive(Debug, Deserialize)]
pub struct ArticlePayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Decoded and validated article body
pub struct ArticleBody(pub ArticleDraft);

impl<S> FromRequest<S> for ArticleBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<ArticlePayload>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Decode(rejection.body_text()))?;

        let draft = ArticleDraft::new(&payload.title, &payload.content)
            .map_err(ArticleError::from)?;

        Ok(Self(draft))
    }
}
