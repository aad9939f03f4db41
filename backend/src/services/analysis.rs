//! Analysis service: weather fetch followed by classification
//!
//! Classification only ever runs after the weather fetch for the same event
//! has resolved, successfully or not.

use serde::Serialize;
use shared::classification::classify;
use shared::{Analysis, Event};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::event_feed::EventFeedService;
use crate::services::selection::{Selection, SelectionTracker};
use crate::services::weather::WeatherGateway;
use crate::AppState;

/// Analysis service
#[derive(Clone)]
pub struct AnalysisService {
    feed: EventFeedService,
    weather: WeatherGateway,
    selection: SelectionTracker,
}

/// Response to a new selection
#[derive(Debug, Clone, Serialize)]
pub struct SelectionResponse {
    #[serde(flatten)]
    pub selection: Selection,
    pub event: Event,
    /// Placeholder until the analysis request resolves
    pub analysis: Analysis,
}

impl AnalysisService {
    pub fn new(feed: EventFeedService, weather: WeatherGateway, selection: SelectionTracker) -> Self {
        Self {
            feed,
            weather,
            selection,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            state.feed.clone(),
            state.weather.clone(),
            state.selection.clone(),
        )
    }

    /// Fetch weather for the event, then classify
    pub async fn analyze_event(&self, event: &Event) -> Analysis {
        let weather = self.weather.fetch_weather(event.location).await;
        classify(event, weather.as_ref())
    }

    /// One-shot analysis of an event in the current snapshot
    pub async fn analyze_by_id(&self, event_id: &str) -> AppResult<Analysis> {
        let event = self.feed.find_event(event_id)?;
        Ok(self.analyze_event(&event).await)
    }

    /// Select an event from the current snapshot
    pub fn select(&self, event_id: &str) -> AppResult<SelectionResponse> {
        let event = self.feed.find_event(event_id)?;
        let selection = self.selection.select(&event.id);
        tracing::debug!("Selected {} ({})", event.id, selection.token);

        Ok(SelectionResponse {
            selection,
            event,
            analysis: Analysis::pending(),
        })
    }

    pub fn deselect(&self) -> Option<Selection> {
        self.selection.clear()
    }

    /// Analyze the selection identified by `token`.
    ///
    /// If the selection is replaced or cleared while the weather fetch is in
    /// flight, the result is discarded and `StaleSelection` is returned.
    pub async fn analyze_selection(&self, token: Uuid) -> AppResult<Analysis> {
        let selection = self
            .selection
            .current()
            .ok_or(AppError::SelectionNotFound)?;
        if selection.token != token {
            return Err(AppError::StaleSelection(token));
        }

        let event = self.feed.find_event(&selection.event_id)?;
        let weather = self.weather.fetch_weather(event.location).await;

        if !self.selection.is_current(token) {
            tracing::warn!(
                "Discarding weather for {}: selection {} changed during fetch",
                event.id,
                token
            );
            return Err(AppError::StaleSelection(token));
        }

        Ok(classify(&event, weather.as_ref()))
    }
}
