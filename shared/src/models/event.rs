//! Natural event models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CartesianPosition, GeoPoint, Orientation};

/// Catalog category ids with a dedicated marker color
pub const CATEGORY_WILDFIRES: u32 = 8;
pub const CATEGORY_SEVERE_STORMS: u32 = 10;
pub const CATEGORY_VOLCANOES: u32 = 12;
pub const CATEGORY_SEA_LAKE_ICE: u32 = 15;

/// Marker color for categories missing from the table
pub const DEFAULT_MARKER_COLOR: &str = "#ffff00";

/// Resolve the marker color for a catalog category id
pub fn category_color(category_id: u32) -> &'static str {
    match category_id {
        CATEGORY_WILDFIRES => "#ff5500",
        CATEGORY_SEVERE_STORMS => "#00ffff",
        CATEGORY_VOLCANOES => "#ff0000",
        CATEGORY_SEA_LAKE_ICE => "#ffffff",
        _ => DEFAULT_MARKER_COLOR,
    }
}

/// Hazard family driving the classification branch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HazardCategory {
    Wildfire,
    SeaLakeIce,
    SevereStorm,
    Volcano,
    Other,
}

impl HazardCategory {
    /// Resolve from a feed category label.
    ///
    /// Case-insensitive substring match with fixed priority
    /// fire > ice/sea > storm > volcano, so "Sea Fire" is a wildfire.
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("fire") {
            HazardCategory::Wildfire
        } else if label.contains("ice") || label.contains("sea") {
            HazardCategory::SeaLakeIce
        } else if label.contains("storm") {
            HazardCategory::SevereStorm
        } else if label.contains("volcano") {
            HazardCategory::Volcano
        } else {
            HazardCategory::Other
        }
    }
}

/// Canonical event record produced by feed normalization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub category_id: u32,
    pub category_label: String,
    pub category: HazardCategory,
    pub location: GeoPoint,
    /// Date of the geometry sample `location` was taken from
    pub observed_at: DateTime<Utc>,
    pub color: String,
    /// Marker position on the render sphere
    pub position: CartesianPosition,
    /// Marker rotation standing it perpendicular to the surface
    pub orientation: Orientation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_colors() {
        assert_eq!(category_color(CATEGORY_WILDFIRES), "#ff5500");
        assert_eq!(category_color(CATEGORY_SEVERE_STORMS), "#00ffff");
        assert_eq!(category_color(CATEGORY_VOLCANOES), "#ff0000");
        assert_eq!(category_color(CATEGORY_SEA_LAKE_ICE), "#ffffff");
        assert_eq!(category_color(6), DEFAULT_MARKER_COLOR);
    }

    #[test]
    fn test_category_from_label() {
        assert_eq!(HazardCategory::from_label("Wildfires"), HazardCategory::Wildfire);
        assert_eq!(HazardCategory::from_label("Sea and Lake Ice"), HazardCategory::SeaLakeIce);
        assert_eq!(HazardCategory::from_label("SEVERE STORMS"), HazardCategory::SevereStorm);
        assert_eq!(HazardCategory::from_label("Volcanoes"), HazardCategory::Volcano);
        assert_eq!(HazardCategory::from_label("Drought"), HazardCategory::Other);
    }

    #[test]
    fn test_category_priority() {
        assert_eq!(HazardCategory::from_label("Ice Storm"), HazardCategory::SeaLakeIce);
        assert_eq!(HazardCategory::from_label("Firestorm"), HazardCategory::Wildfire);
        assert_eq!(HazardCategory::from_label("Volcanic Sea Vent"), HazardCategory::SeaLakeIce);
    }
}
