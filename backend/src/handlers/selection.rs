//! HTTP handlers for event selection and its analysis

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::Analysis;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::analysis::SelectionResponse;
use crate::services::AnalysisService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SelectInput {
    pub event_id: String,
}

/// Select an event; the response carries the token for its analysis
pub async fn select_event(
    State(state): State<AppState>,
    Json(input): Json<SelectInput>,
) -> AppResult<Json<SelectionResponse>> {
    let service = AnalysisService::from_state(&state);
    Ok(Json(service.select(&input.event_id)?))
}

/// Clear the current selection
pub async fn clear_selection(State(state): State<AppState>) -> StatusCode {
    AnalysisService::from_state(&state).deselect();
    StatusCode::NO_CONTENT
}

/// Analyze the selection identified by token
pub async fn analyze_selection(
    State(state): State<AppState>,
    Path(token): Path<Uuid>,
) -> AppResult<Json<Analysis>> {
    let service = AnalysisService::from_state(&state);
    let analysis = service.analyze_selection(token).await?;
    Ok(Json(analysis))
}
