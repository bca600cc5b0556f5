//! Search endpoint
//!
//! One handler serves every profile; the profile attached to the route
//! decides the default limit and whether the match breakdown is added.

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::breakdown::MatchBreakdown;
use crate::config::RouteProfile;
use crate::error::SearchError;
use crate::AppState;

/// POST body
///
/// `limit` is kept loose: clients send integers, floats, or numeric
/// strings, all of which are accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub limit: Option<Value>,
}

impl SearchRequest {
    /// Requested limit as an integer; `Ok(None)` when absent or null
    ///
    /// Fractions are truncated toward zero.
    pub fn limit(&self) -> Result<Option<i64>, SearchError> {
        let Some(limit) = self.limit.as_ref() else {
            return Ok(None);
        };
        match limit {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                .map(Some)
                .ok_or(SearchError::InvalidLimit),
            Value::String(text) => {
                let text = text.trim();
                text.parse::<i64>()
                    .ok()
                    .or_else(|| {
                        text.parse::<f64>()
                            .ok()
                            .filter(|f| f.is_finite())
                            .map(|f| f.trunc() as i64)
                    })
                    .map(Some)
                    .ok_or(SearchError::InvalidLimit)
            }
            _ => Err(SearchError::InvalidLimit),
        }
    }
}

/// Rows exactly as the database function returned them
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<Value>,
    pub count: usize,
    #[serde(flatten)]
    pub breakdown: Option<MatchBreakdown>,
}

/// POST {mount}/api/search
///
/// A body that is absent, not JSON, or carries a non-string query is
/// treated like a missing query.
pub async fn search(
    State(state): State<AppState>,
    Extension(profile): Extension<Arc<RouteProfile>>,
    request: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, SearchError> {
    let request = match request {
        Ok(Json(body)) => body,
        Err(rejection) => {
            debug!("Unusable search body: {}", rejection.body_text());
            SearchRequest::default()
        }
    };

    let query = request.query.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(SearchError::QueryRequired);
    }

    let limit = state.settings.effective_limit(&profile, request.limit()?);
    debug!(profile = %profile.name, limit, "Search: {}", query);

    let results = state.backend.search(query, limit).await?;

    let breakdown = profile
        .include_match_breakdown
        .then(|| MatchBreakdown::from_rows(&results, &state.settings.match_field));

    Ok(Json(SearchResponse {
        count: results.len(),
        results,
        breakdown,
    }))
}
