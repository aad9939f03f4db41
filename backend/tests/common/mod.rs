//! Shared fixtures: in-process stand-ins for the catalog and weather APIs

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use living_earth_backend::config::{Config, FeedConfig, WeatherConfig};
use living_earth_backend::AppState;
use serde_json::{json, Value};

/// Serve `router` on an ephemeral local port, returning its base URL
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL nothing is listening on
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn point(date: &str, lon: f64, lat: f64) -> Value {
    json!({ "type": "Point", "date": date, "coordinates": [lon, lat] })
}

/// Catalog payload: one wildfire, one polygon-only ice record, one volcano
pub fn sample_feed() -> Value {
    json!({
        "title": "EONET Events",
        "events": [
            {
                "id": "EONET_FIRE",
                "title": "Griffith Park Fire",
                "categories": [{ "id": 8, "title": "Wildfires" }],
                "geometries": [
                    point("2024-06-01T00:00:00Z", -118.30, 34.10),
                    point("2024-06-02T00:00:00Z", -118.25, 34.05),
                ],
            },
            {
                "id": "EONET_ICE",
                "title": "Iceberg A68",
                "categories": [{ "id": 15, "title": "Sea and Lake Ice" }],
                "geometries": [{
                    "type": "Polygon",
                    "date": "2024-06-02T00:00:00Z",
                    "coordinates": [[[-50.0, -60.0], [-49.0, -60.0], [-49.0, -61.0], [-50.0, -60.0]]],
                }],
            },
            {
                "id": "EONET_VOLCANO",
                "title": "Etna",
                "categories": [{ "id": 12, "title": "Volcanoes" }],
                "geometries": [point("2024-06-02T00:00:00Z", 14.99, 37.75)],
            },
        ]
    })
}

/// Catalog fixture recording the query strings it receives
pub async fn catalog_server(payload: Value) -> (String, Arc<Mutex<Vec<HashMap<String, String>>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();
    let router = Router::new().route(
        "/events",
        get(move |Query(q): Query<HashMap<String, String>>| {
            let payload = payload.clone();
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(q);
                Json(payload)
            }
        }),
    );
    (serve(router).await, seen)
}

/// Catalog fixture that always answers 503
pub async fn failing_catalog_server() -> String {
    let router = Router::new().route(
        "/events",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
    );
    serve(router).await
}

/// One scripted catalog reply
pub struct CatalogReply {
    pub status: StatusCode,
    pub delay: Duration,
    pub body: Value,
}

impl CatalogReply {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            delay: Duration::ZERO,
            body,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            delay: Duration::ZERO,
            body: json!({ "error": "maintenance" }),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Catalog fixture answering the n-th request with the n-th reply; the last
/// reply repeats once the script runs out
pub async fn scripted_catalog_server(replies: Vec<CatalogReply>) -> String {
    let replies = Arc::new(replies);
    let calls = Arc::new(AtomicUsize::new(0));
    let router = Router::new().route(
        "/events",
        get(move || {
            let replies = replies.clone();
            let calls = calls.clone();
            async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                let reply = &replies[n.min(replies.len() - 1)];
                tokio::time::sleep(reply.delay).await;
                (reply.status, Json(reply.body.clone()))
            }
        }),
    );
    serve(router).await
}

pub fn current_block(wind: f64, temp: f64, humidity: f64, pressure: f64) -> Value {
    json!({
        "time": "2024-06-02T12:00",
        "interval": 900,
        "temperature_2m": temp,
        "relative_humidity_2m": humidity,
        "surface_pressure": pressure,
        "wind_speed_10m": wind,
        "wind_direction_10m": 250,
    })
}

/// Forecast fixture answering with `current` after `delay`, recording queries
pub async fn weather_server(
    current: Value,
    delay: Duration,
) -> (String, Arc<Mutex<Vec<HashMap<String, String>>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();
    let router = Router::new().route(
        "/forecast",
        get(move |Query(q): Query<HashMap<String, String>>| {
            let current = current.clone();
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(q);
                tokio::time::sleep(delay).await;
                Json(json!({
                    "latitude": 34.05,
                    "longitude": -118.25,
                    "current_units": { "wind_speed_10m": "km/h" },
                    "current": current,
                }))
            }
        }),
    );
    (serve(router).await, seen)
}

/// App state pointed at fixture servers
pub fn test_state(feed_url: &str, weather_url: &str) -> AppState {
    AppState::new(Config {
        feed: FeedConfig {
            api_endpoint: feed_url.to_string(),
            ..FeedConfig::default()
        },
        weather: WeatherConfig {
            api_endpoint: weather_url.to_string(),
            ..WeatherConfig::default()
        },
        ..Config::default()
    })
}
