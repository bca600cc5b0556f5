//! Search page serving
//!
//! Each profile may name an HTML file; it is read from disk per request so
//! pages can be edited without restarting the service.

use axum::{response::Html, Extension};
use std::sync::Arc;
use tracing::warn;

use crate::config::RouteProfile;
use crate::error::SearchError;

/// GET {mount}/
pub async fn serve_page(
    Extension(profile): Extension<Arc<RouteProfile>>,
) -> Result<Html<String>, SearchError> {
    let Some(path) = profile.template_path.as_ref() else {
        return Err(SearchError::TemplateNotFound(format!(
            "profile '{}' has no page",
            profile.name
        )));
    };

    match tokio::fs::read_to_string(path).await {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            warn!("Cannot read page {} for profile '{}': {}", path.display(), profile.name, e);
            Err(SearchError::TemplateNotFound(path.display().to_string()))
        }
    }
}
