//! HTTP API handlers for qasaid-search

pub mod health;
pub mod search;
pub mod ui;

pub use health::health_routes;
pub use search::{search, SearchRequest, SearchResponse};
pub use ui::serve_page;
