//! WebAssembly module for the Living Earth globe
//!
//! Provides client-side computation for:
//! - Marker placement and orientation on the render sphere
//! - Mapping picked sphere points back to coordinates
//! - Sun direction for scene lighting
//! - Feed normalization and threat classification without a server round trip
//!
//! Structured values cross the boundary as JSON strings; vectors as flat
//! `Float64Array`s.

use chrono::{DateTime, Utc};
use shared::classification::classify;
use shared::feed::parse_feed;
use shared::geo::{project_lat_lon, surface_orientation, unproject, MARKER_RADIUS};
use shared::solar::current_sun_direction;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

fn to_js(message: String) -> JsValue {
    JsValue::from_str(&message)
}

/// Default radius markers are placed at
#[wasm_bindgen]
pub fn marker_radius() -> f64 {
    MARKER_RADIUS
}

fn position_array(latitude: f64, longitude: f64, radius: f64) -> Result<Vec<f64>, String> {
    project_lat_lon(latitude, longitude, radius)
        .map(|p| p.to_array().to_vec())
        .map_err(|e| e.to_string())
}

/// Sphere position as `[x, y, z]`
#[wasm_bindgen]
pub fn project_to_sphere(latitude: f64, longitude: f64, radius: f64) -> Result<Vec<f64>, JsValue> {
    position_array(latitude, longitude, radius).map_err(to_js)
}

fn coordinates_array(x: f64, y: f64, z: f64) -> Result<Vec<f64>, String> {
    unproject(CartesianPosition::new(x, y, z))
        .map(|p| vec![p.latitude(), p.longitude()])
        .map_err(|e| e.to_string())
}

/// Geodetic `[latitude, longitude]` of a point picked on the sphere
#[wasm_bindgen]
pub fn sphere_to_lat_lon(x: f64, y: f64, z: f64) -> Result<Vec<f64>, JsValue> {
    coordinates_array(x, y, z).map_err(to_js)
}

fn orientation_array(latitude: f64, longitude: f64) -> Result<Vec<f64>, String> {
    let position = project_lat_lon(latitude, longitude, MARKER_RADIUS).map_err(|e| e.to_string())?;
    surface_orientation(position)
        .map(|q| q.to_array().to_vec())
        .map_err(|e| e.to_string())
}

/// Marker rotation quaternion as `[x, y, z, w]`, local up along the normal
#[wasm_bindgen]
pub fn marker_orientation(latitude: f64, longitude: f64) -> Result<Vec<f64>, JsValue> {
    orientation_array(latitude, longitude).map_err(to_js)
}

fn sun_array(unix_millis: f64) -> Result<Vec<f64>, String> {
    if !unix_millis.is_finite() {
        return Err(format!("Invalid timestamp: {}", unix_millis));
    }
    let at: DateTime<Utc> = DateTime::from_timestamp_millis(unix_millis as i64)
        .ok_or_else(|| format!("Timestamp out of range: {}", unix_millis))?;
    Ok(current_sun_direction(at).to_array().to_vec())
}

/// Unit sun direction `[x, y, z]` at a Unix time in milliseconds
#[wasm_bindgen]
pub fn sun_direction(unix_millis: f64) -> Result<Vec<f64>, JsValue> {
    sun_array(unix_millis).map_err(to_js)
}

/// Unit sun direction for the browser's current clock
#[wasm_bindgen]
pub fn sun_direction_now() -> Result<Vec<f64>, JsValue> {
    sun_direction(js_sys::Date::now())
}

/// Marker color for a numeric category id
#[wasm_bindgen]
pub fn marker_color(category_id: u32) -> String {
    category_color(category_id).to_string()
}

fn normalize(body: &str, radius: f64) -> Result<String, String> {
    let report = parse_feed(body, radius).map_err(|e| e.to_string())?;

    #[cfg(target_arch = "wasm32")]
    if !report.skipped.is_empty() {
        web_sys::console::log_1(&JsValue::from_str(&format!(
            "Skipped {} feed records ({} malformed)",
            report.skipped.len(),
            report.malformed_count()
        )));
    }

    serde_json::to_string(&report).map_err(|e| e.to_string())
}

/// Normalize a raw catalog response body into a feed report (JSON)
#[wasm_bindgen]
pub fn normalize_feed_json(body: &str, radius: f64) -> Result<String, JsValue> {
    normalize(body, radius).map_err(to_js)
}

fn classify_json(event_json: &str, weather_json: Option<&str>) -> Result<String, String> {
    let event: Event =
        serde_json::from_str(event_json).map_err(|e| format!("Invalid event JSON: {}", e))?;
    let weather: Option<WeatherReading> = match weather_json {
        Some(json) => serde_json::from_str(json).map_err(|e| format!("Invalid weather JSON: {}", e))?,
        None => None,
    };

    let analysis = classify(&event, weather.as_ref());
    serde_json::to_string(&analysis).map_err(|e| e.to_string())
}

/// Classify an event (JSON) against an optional weather reading (JSON).
///
/// Pass `undefined` or `"null"` for the reading to use neutral conditions.
#[wasm_bindgen]
pub fn classify_event_json(event_json: &str, weather_json: Option<String>) -> Result<String, JsValue> {
    classify_json(event_json, weather_json.as_deref()).map_err(to_js)
}

/// Placeholder analysis shown while weather is loading (JSON)
#[wasm_bindgen]
pub fn pending_analysis_json() -> String {
    serde_json::to_string(&Analysis::pending()).unwrap_or_default()
}
