//! qasaid-search library - thin HTTP proxy in front of a Postgres search function
//!
//! Every route profile mounts a page (`GET {mount}/`) and a search endpoint
//! (`POST {mount}/api/search`). The search text is handed unchanged to the
//! configured stored function; ranking and matching live in the database.

use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod backend;
pub mod breakdown;
pub mod config;
pub mod error;

pub use backend::{BackendError, PgSearchBackend, SearchBackend};
pub use breakdown::MatchBreakdown;
pub use config::{CliConfig, RouteProfile, SearchSettings};
pub use error::SearchError;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn SearchBackend>,
    pub settings: Arc<SearchSettings>,
}

impl AppState {
    pub fn new(backend: Arc<dyn SearchBackend>, settings: SearchSettings) -> Self {
        Self {
            backend,
            settings: Arc::new(settings),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new().merge(api::health_routes());

    for profile in &state.settings.profiles {
        let profile_routes = Router::new()
            .route("/", get(api::serve_page))
            .route("/api/search", post(api::search))
            .layer(Extension(Arc::new(profile.clone())));

        router = if profile.mount.is_empty() {
            router.merge(profile_routes)
        } else {
            router.nest(&profile.mount, profile_routes)
        };
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
