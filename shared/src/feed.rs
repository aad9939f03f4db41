//! Event feed normalization.
//!
//! Turns the catalog's raw `events` array into canonical [`Event`] records.
//! Records are decoded one by one so a single bad entry never costs the rest
//! of the batch; every excluded record is reported in [`FeedReport::skipped`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use crate::error::{CoreError, CoreResult};
use crate::geo::{project, surface_orientation};
use crate::models::{
    category_color, Event, HazardCategory, CATEGORY_SEA_LAKE_ICE, CATEGORY_SEVERE_STORMS,
    CATEGORY_VOLCANOES, CATEGORY_WILDFIRES,
};
use crate::types::GeoPoint;
use crate::validation::validate_radius;

/// Catalog record as published
#[derive(Debug, Deserialize)]
struct RawEvent {
    id: String,
    title: String,
    #[serde(default)]
    categories: Vec<RawCategory>,
    // Newer catalog versions publish the history under `geometry`
    #[serde(default, alias = "geometry")]
    geometries: Vec<RawGeometry>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    id: RawCategoryId,
    title: String,
}

/// Numeric ids in v2.1, slugs in v3
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCategoryId {
    Numeric(u32),
    Text(String),
}

impl RawCategoryId {
    fn resolve(&self) -> u32 {
        match self {
            RawCategoryId::Numeric(id) => *id,
            RawCategoryId::Text(text) => text.parse().unwrap_or(match text.as_str() {
                "wildfires" => CATEGORY_WILDFIRES,
                "severeStorms" => CATEGORY_SEVERE_STORMS,
                "volcanoes" => CATEGORY_VOLCANOES,
                "seaLakeIce" => CATEGORY_SEA_LAKE_ICE,
                _ => 0,
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    date: String,
    coordinates: Value,
}

/// Why a record did not make it into the snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Latest geometry is not a single point; excluded silently
    NotPoint { geometry_type: String },
    Malformed { reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkippedRecord {
    pub id: String,
    pub reason: SkipReason,
}

impl SkippedRecord {
    /// Malformed skips as a core error, for callers that log errors uniformly
    pub fn as_error(&self) -> Option<CoreError> {
        match &self.reason {
            SkipReason::Malformed { reason } => Some(CoreError::MalformedRecord {
                id: self.id.clone(),
                reason: reason.clone(),
            }),
            SkipReason::NotPoint { .. } => None,
        }
    }
}

/// Normalized events plus the records that were left out
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeedReport {
    pub events: Vec<Event>,
    pub skipped: Vec<SkippedRecord>,
}

impl FeedReport {
    pub fn malformed_count(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| matches!(s.reason, SkipReason::Malformed { .. }))
            .count()
    }
}

/// Parse and normalize a raw feed body
pub fn parse_feed(body: &str, radius: f64) -> CoreResult<FeedReport> {
    let payload: Value =
        serde_json::from_str(body).map_err(|e| CoreError::MalformedFeed(e.to_string()))?;
    normalize_feed(&payload, radius)
}

/// Normalize a decoded feed payload, placing markers at `radius`.
///
/// Fails only when the payload has no `events` array or the radius is
/// unusable. Individual records are skipped, never escalated.
pub fn normalize_feed(payload: &Value, radius: f64) -> CoreResult<FeedReport> {
    validate_radius(radius)?;

    let records = payload
        .get("events")
        .and_then(Value::as_array)
        .ok_or_else(|| CoreError::MalformedFeed("missing `events` array".to_string()))?;

    let mut report = FeedReport::default();
    let mut seen = HashSet::new();

    for record in records {
        let id = record
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or("<unknown>")
            .to_string();

        match normalize_record(record, radius) {
            Ok(event) if !seen.insert(event.id.clone()) => report.skipped.push(SkippedRecord {
                id,
                reason: SkipReason::Malformed {
                    reason: "duplicate id in snapshot".to_string(),
                },
            }),
            Ok(event) => report.events.push(event),
            Err(reason) => report.skipped.push(SkippedRecord { id, reason }),
        }
    }

    Ok(report)
}

fn malformed(reason: impl Into<String>) -> SkipReason {
    SkipReason::Malformed {
        reason: reason.into(),
    }
}

fn normalize_record(record: &Value, radius: f64) -> Result<Event, SkipReason> {
    let raw: RawEvent = RawEvent::deserialize(record).map_err(|e| malformed(e.to_string()))?;

    // Latest sample wins; on equal dates the later entry in the history wins
    let (observed_at, geometry) = raw
        .geometries
        .iter()
        .filter_map(|g| parse_date(&g.date).map(|date| (date, g)))
        .max_by(|a, b| a.0.cmp(&b.0))
        .ok_or_else(|| malformed("no dated geometry"))?;

    if geometry.kind != "Point" {
        return Err(SkipReason::NotPoint {
            geometry_type: geometry.kind.clone(),
        });
    }

    let coordinates = Vec::<f64>::deserialize(&geometry.coordinates)
        .map_err(|e| malformed(format!("point coordinates: {}", e)))?;
    let (longitude, latitude) = match coordinates.as_slice() {
        [lon, lat, ..] => (*lon, *lat),
        _ => return Err(malformed("point needs [lon, lat]")),
    };
    let location = GeoPoint::new(latitude, longitude).map_err(|e| malformed(e.to_string()))?;

    let category = raw
        .categories
        .first()
        .ok_or_else(|| malformed("no category"))?;
    let category_id = category.id.resolve();

    let position = project(location, radius).map_err(|e| malformed(e.to_string()))?;
    let orientation = surface_orientation(position).map_err(|e| malformed(e.to_string()))?;

    Ok(Event {
        id: raw.id,
        title: raw.title,
        category_id,
        category_label: category.title.clone(),
        category: HazardCategory::from_label(&category.title),
        location,
        observed_at,
        color: category_color(category_id).to_string(),
        position,
        orientation,
    })
}

fn parse_date(date: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(date)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::MARKER_RADIUS;
    use crate::models::DEFAULT_MARKER_COLOR;
    use chrono::TimeZone;
    use serde_json::json;

    fn point(date: &str, lon: f64, lat: f64) -> Value {
        json!({ "type": "Point", "date": date, "coordinates": [lon, lat] })
    }

    fn record(id: &str, category_id: Value, label: &str, geometries: Vec<Value>) -> Value {
        json!({
            "id": id,
            "title": format!("Event {}", id),
            "categories": [{ "id": category_id, "title": label }],
            "geometries": geometries,
        })
    }

    #[test]
    fn test_latest_geometry_wins() {
        let feed = json!({ "events": [record(
            "EONET_1",
            json!(8),
            "Wildfires",
            vec![
                point("2024-06-02T00:00:00Z", -118.25, 34.05),
                point("2024-06-01T00:00:00Z", -100.0, 30.0),
            ],
        )] });

        let report = normalize_feed(&feed, MARKER_RADIUS).unwrap();
        assert_eq!(report.events.len(), 1);

        let event = &report.events[0];
        assert_eq!(event.location.latitude(), 34.05);
        assert_eq!(event.location.longitude(), -118.25);
        assert_eq!(event.observed_at, Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap());
        assert_eq!(event.color, "#ff5500");
        assert_eq!(event.category, HazardCategory::Wildfire);
    }

    #[test]
    fn test_newer_point_appended_last() {
        let feed = json!({ "events": [record(
            "EONET_2",
            json!(10),
            "Severe Storms",
            vec![
                point("2024-06-01T00:00:00Z", 120.0, 15.0),
                point("2024-06-01T06:00:00Z", 121.5, 16.2),
            ],
        )] });

        let event = &normalize_feed(&feed, 1.0).unwrap().events[0];
        assert_eq!(event.location.longitude(), 121.5);
        assert_eq!(event.location.latitude(), 16.2);
    }

    #[test]
    fn test_polygon_is_excluded_without_error() {
        let polygon = json!({
            "type": "Polygon",
            "date": "2024-06-01T00:00:00Z",
            "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
        });
        let feed = json!({ "events": [
            record("EONET_3", json!(15), "Sea and Lake Ice", vec![polygon]),
            record("EONET_4", json!(12), "Volcanoes", vec![point("2024-06-01T00:00:00Z", 14.99, 37.75)]),
        ] });

        let report = normalize_feed(&feed, MARKER_RADIUS).unwrap();
        assert_eq!(report.events.len(), 1);
        assert_eq!(report.events[0].id, "EONET_4");
        assert_eq!(report.malformed_count(), 0);
        assert_eq!(
            report.skipped[0].reason,
            SkipReason::NotPoint {
                geometry_type: "Polygon".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let feed = json!({ "events": [
            json!({ "id": "NO_TITLE", "categories": [], "geometries": [] }),
            record("NO_GEOMETRY", json!(8), "Wildfires", vec![]),
            record("BAD_COORD", json!(8), "Wildfires", vec![point("2024-06-01T00:00:00Z", 10.0, 95.0)]),
            record("BAD_DATE", json!(8), "Wildfires", vec![point("yesterday", 10.0, 10.0)]),
            json!({ "id": "NO_CATEGORY", "title": "x", "categories": [], "geometries": [point("2024-06-01T00:00:00Z", 1.0, 1.0)] }),
            record("OK", json!(6), "Drought", vec![point("2024-06-01T00:00:00Z", 1.0, 1.0)]),
        ] });

        let report = normalize_feed(&feed, MARKER_RADIUS).unwrap();
        assert_eq!(report.events.len(), 1);
        assert_eq!(report.events[0].color, DEFAULT_MARKER_COLOR);
        assert_eq!(report.events[0].category, HazardCategory::Other);
        assert_eq!(report.malformed_count(), 5);
        assert!(report.skipped.iter().all(|s| s.as_error().is_some()));
    }

    #[test]
    fn test_first_category_wins_and_slug_ids() {
        let feed = json!({ "events": [{
            "id": "EONET_5",
            "title": "Mount Example",
            "categories": [
                { "id": "volcanoes", "title": "Volcanoes" },
                { "id": "wildfires", "title": "Wildfires" },
            ],
            "geometry": [point("2024-06-01T00:00:00Z", 14.99, 37.75)],
        }] });

        let event = &normalize_feed(&feed, MARKER_RADIUS).unwrap().events[0];
        assert_eq!(event.category_id, CATEGORY_VOLCANOES);
        assert_eq!(event.category_label, "Volcanoes");
        assert_eq!(event.color, "#ff0000");
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let geometry = vec![point("2024-06-01T00:00:00Z", 1.0, 1.0)];
        let feed = json!({ "events": [
            record("DUP", json!(8), "Wildfires", geometry.clone()),
            record("DUP", json!(10), "Severe Storms", geometry),
        ] });

        let report = normalize_feed(&feed, MARKER_RADIUS).unwrap();
        assert_eq!(report.events.len(), 1);
        assert_eq!(report.events[0].category_id, CATEGORY_WILDFIRES);
        assert_eq!(report.malformed_count(), 1);
    }

    #[test]
    fn test_position_and_orientation_precomputed() {
        let feed = json!({ "events": [record(
            "EONET_6",
            json!(8),
            "Wildfires",
            vec![point("2024-06-01T00:00:00Z", 0.0, 90.0)],
        )] });

        let event = &normalize_feed(&feed, 2.0).unwrap().events[0];
        assert!((event.position.y - 2.0).abs() < 1e-9);
        assert!((event.orientation.w.abs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_payload_without_events_fails() {
        assert!(matches!(
            normalize_feed(&json!({ "title": "EONET" }), 1.0),
            Err(CoreError::MalformedFeed(_))
        ));
        assert!(matches!(parse_feed("<html>", 1.0), Err(CoreError::MalformedFeed(_))));
    }
}
