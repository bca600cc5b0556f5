//! Database access for search
//!
//! The service never builds search SQL of its own: every request is
//! forwarded verbatim to one pre-existing stored function, and the rows
//! it returns are relayed as JSON.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use thiserror::Error;

/// Search backend errors
#[derive(Debug, Error)]
pub enum BackendError {
    /// Connection or query failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configured function name is not a plain SQL identifier
    #[error("Invalid search function name: {0}")]
    InvalidFunctionName(String),
}

/// Source of search rows
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run the search and return its rows in result order
    async fn search(&self, query: &str, limit: i32) -> Result<Vec<Value>, BackendError>;
}

/// Postgres backend calling a stored search function
pub struct PgSearchBackend {
    pool: PgPool,
    sql: String,
}

impl PgSearchBackend {
    /// Create the backend without opening a connection
    ///
    /// Connections are established on first use, so the service starts
    /// (and reports database trouble per request) even while the database
    /// is unreachable.
    pub fn connect_lazy(database_url: &str, function: &str) -> Result<Self, BackendError> {
        validate_function_name(function)?;

        let pool = PgPoolOptions::new()
            .max_connections(4)
            .acquire_timeout(Duration::from_secs(10))
            .connect_lazy(database_url)?;

        Ok(Self {
            pool,
            sql: search_sql(function),
        })
    }
}

#[async_trait]
impl SearchBackend for PgSearchBackend {
    async fn search(&self, query: &str, limit: i32) -> Result<Vec<Value>, BackendError> {
        let rows: Vec<Value> = sqlx::query_scalar(&self.sql)
            .bind(query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

/// SQL invoking `function`, one JSON object per returned row
pub fn search_sql(function: &str) -> String {
    format!("SELECT to_jsonb(r) FROM {}($1, $2) AS r", function)
}

/// Accept `name` or `schema.name` made of ASCII letters, digits and `_`
///
/// The function name is interpolated into SQL, so nothing else passes.
pub fn validate_function_name(function: &str) -> Result<(), BackendError> {
    let parts: Vec<&str> = function.split('.').collect();
    let valid = parts.len() <= 2
        && parts.iter().all(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) if first.is_ascii_alphabetic() || first == '_' => {
                    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
                }
                _ => false,
            }
        });

    if valid {
        Ok(())
    } else {
        Err(BackendError::InvalidFunctionName(function.to_string()))
    }
}
