//! Living Earth - Backend Server
//!
//! Serves the natural-event feed, placed on the render sphere, together with
//! on-demand weather-backed threat analysis and the solar illumination
//! direction.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use external::{EventFeedClient, WeatherClient};
use services::{EventFeedService, SelectionTracker, WeatherGateway};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub feed: EventFeedService,
    pub weather: WeatherGateway,
    pub selection: SelectionTracker,
}

impl AppState {
    /// Wire up clients and services from configuration
    pub fn new(config: Config) -> Self {
        let feed = EventFeedService::new(
            EventFeedClient::new(&config.feed),
            config.globe.marker_radius,
        );
        let weather = WeatherGateway::new(WeatherClient::new(&config.weather));

        Self {
            config: Arc::new(config),
            feed,
            weather,
            selection: SelectionTracker::new(),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Living Earth Planetary Dashboard API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
