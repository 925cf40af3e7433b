//! Service error taxonomy

use thiserror::Error;

use crate::db::DbError;
use crate::models::ValidationError;

/// Closed set of failures a service call can produce.
///
/// The HTTP layer maps each variant to exactly one status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArticleError {
    #[error("Given Param is not valid: {0}")]
    BadParamInput(String),

    #[error("Your Item already exist: {0}")]
    Conflict(String),

    #[error("Your requested Item is not found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl ArticleError {
    pub(crate) fn deadline_exceeded() -> Self {
        Self::Internal("context deadline exceeded".to_string())
    }

    pub(crate) fn article_not_found(id: i64) -> Self {
        Self::NotFound(format!("article {}", id))
    }
}

impl From<ValidationError> for ArticleError {
    fn from(e: ValidationError) -> Self {
        Self::BadParamInput(e.to_string())
    }
}

impl From<DbError> for ArticleError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Conflict { title } => Self::Conflict(format!("title '{}'", title)),
            DbError::Sqlx(e) => Self::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_conflict_maps_to_conflict() {
        let err = ArticleError::from(DbError::Conflict {
            title: "hello".into(),
        });
        assert_eq!(err, ArticleError::Conflict("title 'hello'".into()));
    }

    #[test]
    fn sqlx_error_maps_to_internal() {
        let err = ArticleError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        assert!(matches!(err, ArticleError::Internal(_)));
    }

    #[test]
    fn validation_maps_to_bad_param() {
        let err = ArticleError::from(ValidationError::Empty { field: "title" });
        assert_eq!(err, ArticleError::BadParamInput("title is required".into()));
    }
}
