mod config;
mod errors;
mod export;
mod layout;
mod profile;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::layout::PageSpec;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cvflow API v{}", env!("CARGO_PKG_VERSION"));

    // Default page spec; a bad configuration must never reach a request
    let page_spec = PageSpec::preset(config.page_format).with_columns(config.grid_columns);
    page_spec
        .validate()
        .context("Default page spec from PAGE_FORMAT / GRID_COLUMNS is invalid")?;
    info!(
        "Layout page spec: {:?} {}x{}pt, {} grid columns, missing data: {:?}",
        config.page_format,
        page_spec.page_width,
        page_spec.page_height,
        page_spec.columns,
        config.on_missing_data
    );

    let state = AppState::new(config.clone(), page_spec);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
