//! Route definitions for the Living Earth server

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Event feed
        .nest("/events", event_routes())
        // Selection and its analysis
        .nest("/selection", selection_routes())
        // Point weather lookup
        .route("/weather", get(handlers::get_weather))
        // Sphere geometry
        .route("/sun", get(handlers::get_sun_direction))
        .route("/project", get(handlers::project_point))
}

/// Event feed routes
fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_events))
        .route("/refresh", post(handlers::refresh_events))
        .route("/:event_id", get(handlers::get_event))
        .route("/:event_id/analysis", get(handlers::analyze_event))
}

/// Selection routes
fn selection_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(handlers::select_event).delete(handlers::clear_selection),
        )
        .route("/:token/analysis", post(handlers::analyze_selection))
}
