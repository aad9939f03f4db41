//! Weather data models

use serde::{Deserialize, Serialize};

/// Point-in-time weather telemetry for an event location.
///
/// Field names follow the provider's current-conditions keys so a `current`
/// object deserializes straight into this type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct WeatherReading {
    #[serde(rename = "temperature_2m")]
    pub temperature_c: Option<f64>,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed_kmh: Option<f64>,
    #[serde(rename = "wind_direction_10m")]
    pub wind_direction_deg: Option<f64>,
    #[serde(rename = "surface_pressure")]
    pub surface_pressure_hpa: Option<f64>,
    #[serde(rename = "relative_humidity_2m")]
    pub relative_humidity_pct: Option<f64>,
}

impl WeatherReading {
    /// Neutral conditions used when no live reading is available
    pub const NEUTRAL: WeatherReading = WeatherReading {
        temperature_c: Some(20.0),
        wind_speed_kmh: Some(15.0),
        wind_direction_deg: None,
        surface_pressure_hpa: Some(1013.0),
        relative_humidity_pct: Some(50.0),
    };

    /// True when every field the classifier reads is present and finite
    pub fn is_complete(&self) -> bool {
        [
            self.temperature_c,
            self.wind_speed_kmh,
            self.surface_pressure_hpa,
            self.relative_humidity_pct,
        ]
        .iter()
        .all(|v| v.is_some_and(f64::is_finite))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_provider_current_block() {
        let json = r#"{
            "time": "2024-06-21T12:00",
            "interval": 900,
            "temperature_2m": 38.0,
            "relative_humidity_2m": 12,
            "surface_pressure": 1005.2,
            "wind_speed_10m": 45.0,
            "wind_direction_10m": 270
        }"#;
        let reading: WeatherReading = serde_json::from_str(json).unwrap();

        assert_eq!(reading.temperature_c, Some(38.0));
        assert_eq!(reading.relative_humidity_pct, Some(12.0));
        assert_eq!(reading.wind_direction_deg, Some(270.0));
        assert!(reading.is_complete());
    }

    #[test]
    fn test_missing_field_is_incomplete() {
        let reading: WeatherReading =
            serde_json::from_str(r#"{"temperature_2m": 5.0, "wind_speed_10m": 3.0}"#).unwrap();
        assert!(!reading.is_complete());
    }

    #[test]
    fn test_wind_direction_not_required() {
        let reading = WeatherReading {
            wind_direction_deg: None,
            ..WeatherReading::NEUTRAL
        };
        assert!(reading.is_complete());
    }
}
