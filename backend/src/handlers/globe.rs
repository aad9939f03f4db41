//! HTTP handlers for sphere geometry: projection and sun direction

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::geo::{project_lat_lon, surface_orientation};
use shared::solar::{current_sun_direction, subsolar_point};
use shared::{CartesianPosition, GeoPoint, Orientation};

use crate::error::AppResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SunQuery {
    /// Instant to evaluate; defaults to now
    pub at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct SunResponse {
    pub at: DateTime<Utc>,
    pub direction: CartesianPosition,
    pub subsolar_point: GeoPoint,
}

/// Current sun direction for illumination
pub async fn get_sun_direction(Query(query): Query<SunQuery>) -> Json<SunResponse> {
    let at = query.at.unwrap_or_else(Utc::now);
    Json(SunResponse {
        at,
        direction: current_sun_direction(at),
        subsolar_point: subsolar_point(at),
    })
}

#[derive(Debug, Deserialize)]
pub struct ProjectQuery {
    pub latitude: f64,
    pub longitude: f64,
    /// Defaults to the configured marker radius
    pub radius: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub position: CartesianPosition,
    pub orientation: Orientation,
}

/// Project a coordinate onto the render sphere
pub async fn project_point(
    State(state): State<AppState>,
    Query(query): Query<ProjectQuery>,
) -> AppResult<Json<ProjectResponse>> {
    let radius = query.radius.unwrap_or(state.config.globe.marker_radius);
    let position = project_lat_lon(query.latitude, query.longitude, radius)?;
    let orientation = surface_orientation(position)?;
    Ok(Json(ProjectResponse {
        position,
        orientation,
    }))
}
