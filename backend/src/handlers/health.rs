//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub feed: String,
    pub events: usize,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.feed.snapshot();
    let feed_status = match (&snapshot.error, snapshot.fetched_at) {
        (Some(_), _) => "degraded",
        (None, Some(_)) => "ok",
        (None, None) => "pending",
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        feed: feed_status.to_string(),
        events: snapshot.events.len(),
    })
}
