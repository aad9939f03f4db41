//! HTTP handlers for the event feed

use axum::{
    extract::{Path, State},
    Json,
};
use shared::{Analysis, Event};

use crate::error::AppResult;
use crate::services::{AnalysisService, FeedSnapshot};
use crate::AppState;

/// Get the current feed snapshot
pub async fn list_events(State(state): State<AppState>) -> Json<FeedSnapshot> {
    Json(state.feed.snapshot().as_ref().clone())
}

/// Refresh the feed now and return the new snapshot
pub async fn refresh_events(State(state): State<AppState>) -> Json<FeedSnapshot> {
    Json(state.feed.refresh().await.as_ref().clone())
}

/// Get a single event from the current snapshot
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> AppResult<Json<Event>> {
    Ok(Json(state.feed.find_event(&event_id)?))
}

/// Fetch weather for an event and classify it
pub async fn analyze_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> AppResult<Json<Analysis>> {
    let service = AnalysisService::from_state(&state);
    let analysis = service.analyze_by_id(&event_id).await?;
    Ok(Json(analysis))
}
