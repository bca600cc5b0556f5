//! qasaid-search - HTTP front for the poem search functions
//!
//! Serves the search pages and forwards each query to a stored Postgres
//! function. The connection string is taken from `QASAID_DATABASE_URL`.

use anyhow::{Context, Result};
use clap::Parser;
use qasaid_common::config::{database_url_from_env, load_toml_config};
use qasaid_common::logging::init_tracing;
use qasaid_search::{build_router, AppState, CliConfig, PgSearchBackend, SearchSettings};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Command-line arguments for qasaid-search
#[derive(Parser, Debug)]
#[command(name = "qasaid-search")]
#[command(about = "Search proxy for the poem database", long_about = None)]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long, env = "QASAID_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "QASAID_SEARCH_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "QASAID_SEARCH_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = load_toml_config(args.config.as_deref())?;
    init_tracing(&toml_config.logging.level)?;

    info!(
        "Starting qasaid-search v{} [{}] built {}",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP")
    );

    let cli = CliConfig {
        host: args.host,
        port: args.port,
    };
    let settings = SearchSettings::resolve(&cli, &toml_config.search)?;

    let database_url = database_url_from_env()?;
    let backend = PgSearchBackend::connect_lazy(&database_url, &settings.function)
        .context("Failed to set up database pool")?;
    info!("Search function: {}", settings.function);

    for profile in &settings.profiles {
        match &profile.template_path {
            Some(path) if !path.exists() => {
                warn!("Profile '{}': page {} not found", profile.name, path.display())
            }
            _ => {}
        }
        info!(
            "Profile '{}' at {} (default limit {}, breakdown {})",
            profile.name,
            profile.search_route(),
            profile.default_limit,
            profile.include_match_breakdown
        );
    }

    let addr = format!("{}:{}", settings.host, settings.port);
    let state = AppState::new(Arc::new(backend), settings);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("qasaid-search listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("qasaid-search stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
