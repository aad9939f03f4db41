//! HTTP handlers for weather lookups

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::{GeoPoint, WeatherReading};
use validator::Validate;

use crate::error::AppResult;
use crate::AppState;

/// Query parameters for a point lookup
#[derive(Debug, Deserialize, Validate)]
pub struct LocationQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

/// Fetch current weather; `null` when the provider is unavailable
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<Option<WeatherReading>>> {
    query.validate()?;
    let point = GeoPoint::new(query.latitude, query.longitude)?;
    Ok(Json(state.weather.fetch_weather(point).await))
}
