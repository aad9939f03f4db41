//! Living Earth - Backend Server
//!
//! Keeps the natural-event snapshot fresh and serves it with weather-backed
//! threat analysis.

use std::{net::SocketAddr, time::Duration};

use living_earth_backend::{create_app, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "living_earth_server=debug,living_earth_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Living Earth Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Event catalog: {}", config.feed.api_endpoint);

    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid server.host {}: {}", config.server.host, e))?;
    let addr = SocketAddr::new(host, config.server.port);
    let refresh_interval = Duration::from_secs(config.feed.refresh_interval_secs.max(1));

    // Create application state
    let state = AppState::new(config);

    // Keep the feed snapshot fresh in the background
    let refresher = state.feed.spawn_refresh_loop(refresh_interval);

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let served = axum::serve(listener, app).await;

    refresher.abort();
    served?;

    Ok(())
}
