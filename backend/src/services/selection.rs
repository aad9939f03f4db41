//! Tracks which event the user currently has selected
//!
//! Every selection gets a fresh token. Work started for a token is only
//! applied if that token is still current when the work finishes.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Selection {
    pub token: Uuid,
    pub event_id: String,
}

#[derive(Clone, Default)]
pub struct SelectionTracker {
    current: Arc<Mutex<Option<Selection>>>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an event, superseding any previous selection
    pub fn select(&self, event_id: &str) -> Selection {
        let selection = Selection {
            token: Uuid::new_v4(),
            event_id: event_id.to_string(),
        };
        *self.lock() = Some(selection.clone());
        selection
    }

    /// Deselect; returns what was selected
    pub fn clear(&self) -> Option<Selection> {
        self.lock().take()
    }

    pub fn current(&self) -> Option<Selection> {
        self.lock().clone()
    }

    pub fn is_current(&self, token: Uuid) -> bool {
        self.lock().as_ref().is_some_and(|s| s.token == token)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Selection>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_selection_supersedes_old() {
        let tracker = SelectionTracker::new();
        let first = tracker.select("EONET_1");
        let second = tracker.select("EONET_2");

        assert!(!tracker.is_current(first.token));
        assert!(tracker.is_current(second.token));
        assert_eq!(tracker.current().unwrap().event_id, "EONET_2");
    }

    #[test]
    fn test_reselecting_same_event_issues_new_token() {
        let tracker = SelectionTracker::new();
        let first = tracker.select("EONET_1");
        let again = tracker.select("EONET_1");

        assert_ne!(first.token, again.token);
        assert!(!tracker.is_current(first.token));
    }

    #[test]
    fn test_clear_invalidates_token() {
        let tracker = SelectionTracker::new();
        let selection = tracker.select("EONET_1");

        assert_eq!(tracker.clear(), Some(selection.clone()));
        assert!(!tracker.is_current(selection.token));
        assert!(tracker.current().is_none());
        assert!(tracker.clear().is_none());
    }
}
