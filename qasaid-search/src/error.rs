//! HTTP-facing errors for qasaid-search

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::backend::BackendError;

/// Search request errors
#[derive(Debug, Error)]
pub enum SearchError {
    /// Missing, null, or blank query (400)
    #[error("Query required")]
    QueryRequired,

    /// Limit present but neither a number nor a numeric string (400)
    #[error("Invalid limit")]
    InvalidLimit,

    /// Backend failure (500); details are logged, never returned
    #[error("Database query failed")]
    Database(#[from] BackendError),

    /// Profile has no page, or its file cannot be read (404)
    #[error("Template not found: {0}")]
    TemplateNotFound(String),
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            SearchError::QueryRequired | SearchError::InvalidLimit => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            SearchError::Database(source) => {
                error!("Search query failed: {}", source);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            SearchError::TemplateNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            SearchError::QueryRequired.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SearchError::InvalidLimit.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SearchError::TemplateNotFound("x.html".to_string())
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            SearchError::Database(BackendError::Database(sqlx::Error::PoolTimedOut))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_database_message_is_generic() {
        let err = SearchError::Database(BackendError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(err.to_string(), "Database query failed");
    }
}
