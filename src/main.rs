// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::telemetry_repository::TelemetryRepository;
use crate::infrastructure::config::{load_app_config, load_geofences, load_widgets_config, SourceKind};
use crate::infrastructure::influx_repository::InfluxRepository;
use crate::infrastructure::mock_repository::MockRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let app_config = load_app_config()?;
    let widgets_config = load_widgets_config()?;
    let geofences = load_geofences()?;

    // Create repository (infrastructure layer)
    let repository: Arc<dyn TelemetryRepository> = match app_config.source.kind {
        SourceKind::Mock => {
            tracing::info!("Serving mock telemetry");
            Arc::new(MockRepository::new())
        }
        SourceKind::Influx => {
            let influx = app_config
                .source
                .influx
                .context("source.kind is influx but [source.influx] is missing")?;
            tracing::info!("Reading telemetry from InfluxDB at {}", influx.host);
            Arc::new(InfluxRepository::new(
                influx.host,
                influx.token,
                influx.database,
                influx.retention_policy,
                app_config.source.online_window_secs,
            ))
        }
    };

    // Create services and application state
    let state = Arc::new(AppState::new(
        repository,
        widgets_config,
        geofences,
        app_config.dashboard.default_hours,
    ));

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = app_config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address {}", app_config.server.bind_addr))?;
    tracing::info!("Starting petwatch-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
