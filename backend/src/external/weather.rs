//! Weather API client for fetching current conditions
//!
//! Integrates with the Open-Meteo forecast API, requesting metric units and
//! wind speed in km/h.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use shared::{GeoPoint, WeatherReading};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Current-condition fields requested from the provider
pub const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,surface_pressure,wind_speed_10m,wind_direction_10m";

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

/// Forecast API response; only the current block is used
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<WeatherReading>,
}

impl WeatherClient {
    /// Create a new WeatherClient from configuration
    pub fn new(config: &WeatherConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(
                    "Falling back to a default {} client without the configured timeout: {}",
                    "weather",
                    e
                );
                Client::new()
            });

        Self {
            client,
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self::new(&WeatherConfig {
            api_endpoint: base_url,
            ..WeatherConfig::default()
        })
    }

    /// Fetch current weather conditions at a point.
    ///
    /// A reading missing any classifier input is rejected rather than
    /// returned half-filled.
    pub async fn get_current_weather(&self, point: GeoPoint) -> AppResult<WeatherReading> {
        let url = format!("{}/forecast", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", point.latitude().to_string()),
                ("longitude", point.longitude().to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("wind_speed_unit", "kmh".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::WeatherFetchFailed(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherFetchFailed(format!(
                "weather API error: {} - {}",
                status, body
            )));
        }

        let data: ForecastResponse = response.json().await.map_err(|e| {
            AppError::WeatherFetchFailed(format!("failed to parse weather response: {}", e))
        })?;

        match data.current {
            Some(reading) if reading.is_complete() => Ok(reading),
            Some(_) => Err(AppError::WeatherFetchFailed(
                "current conditions missing required fields".to_string(),
            )),
            None => Err(AppError::WeatherFetchFailed(
                "response has no current conditions".to_string(),
            )),
        }
    }
}
