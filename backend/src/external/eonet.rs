//! Natural event catalog client
//!
//! Fetches the open-event feed and hands the payload to the shared
//! normalizer. Per-record problems come back in the report; only transport
//! and whole-payload failures surface as errors here.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use shared::feed::{normalize_feed, FeedReport};

use crate::config::FeedConfig;
use crate::error::{AppError, AppResult};

/// Event catalog API client
#[derive(Clone)]
pub struct EventFeedClient {
    client: Client,
    base_url: String,
    limit: u32,
    status: String,
}

impl EventFeedClient {
    /// Create a new EventFeedClient from configuration
    pub fn new(config: &FeedConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(
                    "Falling back to a default {} client without the configured timeout: {}",
                    "event catalog",
                    e
                );
                Client::new()
            });

        Self {
            client,
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
            limit: config.limit,
            status: config.status.clone(),
        }
    }

    /// Create a new EventFeedClient with custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self::new(&FeedConfig {
            api_endpoint: base_url,
            ..FeedConfig::default()
        })
    }

    /// Fetch the raw feed payload
    pub async fn fetch_raw(&self) -> AppResult<Value> {
        let url = format!("{}/events", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", self.limit.to_string()), ("status", self.status.clone())])
            .send()
            .await
            .map_err(|e| AppError::FeedFetchFailed(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::FeedFetchFailed(format!(
                "catalog error: {} - {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::FeedFetchFailed(format!("failed to parse feed: {}", e)))
    }

    /// Fetch and normalize the feed, projecting markers at `radius`
    pub async fn fetch_events(&self, radius: f64) -> AppResult<FeedReport> {
        let payload = self.fetch_raw().await?;
        Ok(normalize_feed(&payload, radius)?)
    }
}
