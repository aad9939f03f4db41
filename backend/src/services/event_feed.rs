//! Event feed service: owns the current feed snapshot
//!
//! Each refresh builds a complete new snapshot and swaps it in under a short
//! write lock, so readers see either the old or the new snapshot in full.
//! Refreshes are sequence-numbered; one that started earlier never replaces
//! a snapshot published by one that started later.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::feed::{FeedReport, SkipReason};
use shared::Event;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::EventFeedClient;

/// One complete, atomically published fetch result
#[derive(Debug, Clone, Serialize)]
pub struct FeedSnapshot {
    pub id: Uuid,
    pub fetched_at: Option<DateTime<Utc>>,
    /// Set when the fetch that produced this snapshot failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub events: Vec<Event>,
}

impl FeedSnapshot {
    /// Snapshot published before the first refresh completes
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            fetched_at: None,
            error: None,
            events: Vec::new(),
        }
    }

    fn from_result(result: AppResult<Vec<Event>>) -> Self {
        let (events, error) = match result {
            Ok(events) => (events, None),
            Err(err) => (Vec::new(), Some(err.to_string())),
        };
        Self {
            id: Uuid::new_v4(),
            fetched_at: Some(Utc::now()),
            error,
            events,
        }
    }

    pub fn find(&self, event_id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == event_id)
    }
}

struct Published {
    sequence: u64,
    snapshot: Arc<FeedSnapshot>,
}

struct FeedState {
    client: EventFeedClient,
    marker_radius: f64,
    next_sequence: AtomicU64,
    published: RwLock<Published>,
}

/// Event feed service
#[derive(Clone)]
pub struct EventFeedService {
    inner: Arc<FeedState>,
}

impl EventFeedService {
    /// Create a new EventFeedService with an empty snapshot
    pub fn new(client: EventFeedClient, marker_radius: f64) -> Self {
        Self {
            inner: Arc::new(FeedState {
                client,
                marker_radius,
                next_sequence: AtomicU64::new(1),
                published: RwLock::new(Published {
                    sequence: 0,
                    snapshot: Arc::new(FeedSnapshot::empty()),
                }),
            }),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<FeedSnapshot> {
        self.inner
            .published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot
            .clone()
    }

    /// Look up an event in the current snapshot
    pub fn find_event(&self, event_id: &str) -> AppResult<Event> {
        self.snapshot()
            .find(event_id)
            .cloned()
            .ok_or_else(|| AppError::EventNotFound(event_id.to_string()))
    }

    /// Fetch and normalize the feed without publishing it.
    ///
    /// Failures are logged and yield an empty list; call again to retry.
    pub async fn fetch_events(&self) -> Vec<Event> {
        match self.fetch_report().await {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Event feed unavailable: {}", e);
                Vec::new()
            }
        }
    }

    /// Fetch the feed and publish the result as the new snapshot.
    ///
    /// A failed fetch publishes an empty snapshot carrying the error text.
    pub async fn refresh(&self) -> Arc<FeedSnapshot> {
        let sequence = self.inner.next_sequence.fetch_add(1, Ordering::SeqCst);

        let result = self.fetch_report().await;
        if let Err(e) = &result {
            tracing::error!("Event feed refresh failed: {}", e);
        }
        let snapshot = Arc::new(FeedSnapshot::from_result(result));

        let mut published = self
            .inner
            .published
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if sequence > published.sequence {
            tracing::info!(
                "Published feed snapshot {} with {} events",
                snapshot.id,
                snapshot.events.len()
            );
            published.sequence = sequence;
            published.snapshot = snapshot.clone();
            snapshot
        } else {
            tracing::debug!("Discarding superseded feed refresh #{}", sequence);
            published.snapshot.clone()
        }
    }

    async fn fetch_report(&self) -> AppResult<Vec<Event>> {
        let report = self
            .inner
            .client
            .fetch_events(self.inner.marker_radius)
            .await?;
        log_skipped(&report);
        Ok(report.events)
    }

    /// Refresh now and then every `interval` until the task is aborted
    pub fn spawn_refresh_loop(&self, interval: Duration) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                service.refresh().await;
            }
        })
    }
}

fn log_skipped(report: &FeedReport) {
    for skipped in &report.skipped {
        match &skipped.reason {
            SkipReason::NotPoint { geometry_type } => {
                tracing::debug!("Skipping {}: latest geometry is {}", skipped.id, geometry_type);
            }
            SkipReason::Malformed { reason } => {
                tracing::warn!("Skipping malformed record {}: {}", skipped.id, reason);
            }
        }
    }
}
