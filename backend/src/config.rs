//! Configuration management for the Living Earth server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with LIVING_EARTH prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Natural event catalog configuration
    pub feed: FeedConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Render sphere configuration
    pub globe: GlobeConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    /// Event catalog base URL
    pub api_endpoint: String,

    /// Maximum number of events requested per refresh
    pub limit: u32,

    /// Event status filter
    pub status: String,

    /// Seconds between background refreshes
    pub refresh_interval_secs: u64,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Forecast API base URL
    pub api_endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GlobeConfig {
    /// Radius markers are projected at
    pub marker_radius: f64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("LIVING_EARTH_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("feed.api_endpoint", FeedConfig::default().api_endpoint)?
            .set_default("feed.limit", 50)?
            .set_default("feed.status", "open")?
            .set_default("feed.refresh_interval_secs", 300)?
            .set_default("feed.timeout_secs", 15)?
            .set_default("weather.api_endpoint", WeatherConfig::default().api_endpoint)?
            .set_default("weather.timeout_secs", 10)?
            .set_default("globe.marker_radius", shared::geo::MARKER_RADIUS)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (LIVING_EARTH prefix)
            .add_source(
                Environment::with_prefix("LIVING_EARTH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            feed: FeedConfig::default(),
            weather: WeatherConfig::default(),
            globe: GlobeConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://eonet.gsfc.nasa.gov/api/v2.1".to_string(),
            limit: 50,
            status: "open".to_string(),
            refresh_interval_secs: 300,
            timeout_secs: 15,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://api.open-meteo.com/v1".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            marker_radius: shared::geo::MARKER_RADIUS,
        }
    }
}
