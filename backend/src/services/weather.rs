//! Weather gateway: current conditions or nothing

use shared::{GeoPoint, WeatherReading};

use crate::external::WeatherClient;

/// Wraps the weather client so callers never see a fetch error
#[derive(Clone)]
pub struct WeatherGateway {
    client: WeatherClient,
}

impl WeatherGateway {
    pub fn new(client: WeatherClient) -> Self {
        Self { client }
    }

    /// Fetch a complete reading, or `None` after logging why not.
    ///
    /// Safe to call again for a retry; nothing is cached.
    pub async fn fetch_weather(&self, point: GeoPoint) -> Option<WeatherReading> {
        match self.client.get_current_weather(point).await {
            Ok(reading) => {
                tracing::debug!(
                    "Weather at ({}, {}): {:?}",
                    point.latitude(),
                    point.longitude(),
                    reading
                );
                Some(reading)
            }
            Err(e) => {
                tracing::warn!(
                    "No live weather for ({}, {}), using defaults: {}",
                    point.latitude(),
                    point.longitude(),
                    e
                );
                None
            }
        }
    }
}
