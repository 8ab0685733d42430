//! Climate API
//!
//! Read-only JSON API over the Hawaii climate store: precipitation series,
//! station list, temperature observations and min/avg/max summaries.

mod cli;
mod config;
mod routes;
mod storage;
mod types;

use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::routes::AppState;
use crate::storage::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_server(cli).await
}

/// Run the API server.
async fn run_server(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let mut config = AppConfig::load()?;

    // Override with CLI args
    if let Some(h) = cli.host {
        config.server.host = h;
    }
    if let Some(p) = cli.port {
        config.server.port = p;
    }
    if let Some(d) = cli.database {
        config.database.path = d;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("Database path: {}", config.database.path);

    // Reflect the store before serving anything
    let (db, schema) = Database::open(&config.database.path)?;
    tracing::info!("Reflected {}: {}", schema.station.name, schema.station.describe());
    tracing::info!(
        "Reflected {}: {}",
        schema.measurement.name,
        schema.measurement.describe()
    );

    let state = Arc::new(AppState { db });
    let app = routes::router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
