//! Per-profile debouncing
//!
//! Two independent time gates keep a save burst from flooding the system:
//! the producer-side gate here decides whether an event is queued at all,
//! and [`should_overwrite_last`] decides on the consumer side whether a
//! queued event refreshes the newest snapshot or opens a new one.

use crate::event::SaveEventKind;
use std::collections::HashMap;

/// Producer-side debounce state, owned by one watcher instance
///
/// Tracks the last enqueued event time per profile. Instance state rather
/// than anything process-global, so independent watchers (and tests) do
/// not interfere with each other.
#[derive(Debug)]
pub struct DebounceState {
    threshold_secs: i64,
    last_event: HashMap<u8, i64>,
}

impl DebounceState {
    pub fn new(threshold_secs: i64) -> Self {
        Self {
            threshold_secs,
            last_event: HashMap::new(),
        }
    }

    /// Decide whether an event passes the producer-side gate
    ///
    /// `Created` events always pass. `Modified` events pass only when the
    /// gap since the profile's last enqueued event exceeds the threshold;
    /// passing events record their timestamp.
    pub fn admit(&mut self, profile: u8, kind: SaveEventKind, timestamp: i64) -> bool {
        if kind == SaveEventKind::Created {
            return true;
        }

        match self.last_event.get(&profile) {
            Some(&last) if timestamp - last <= self.threshold_secs => false,
            _ => {
                self.last_event.insert(profile, timestamp);
                true
            }
        }
    }
}

/// Consumer-side decision: refresh the newest snapshot or open a new one
///
/// A gap at or under the threshold since the profile's last snapshot means
/// the player is still in the same room, so the last snapshot is
/// overwritten in place. A missing last-snapshot time always opens a new
/// snapshot.
pub fn should_overwrite_last(
    last_snapshot: Option<i64>,
    event_timestamp: i64,
    threshold_secs: i64,
) -> bool {
    match last_snapshot {
        Some(last) => event_timestamp - last <= threshold_secs,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modified_events_within_threshold_collapse() {
        let mut state = DebounceState::new(5);
        assert!(state.admit(1, SaveEventKind::Modified, 100));
        assert!(!state.admit(1, SaveEventKind::Modified, 102));
    }

    #[test]
    fn test_modified_events_past_threshold_pass() {
        let mut state = DebounceState::new(5);
        assert!(state.admit(1, SaveEventKind::Modified, 100));
        assert!(state.admit(1, SaveEventKind::Modified, 106));
    }

    #[test]
    fn test_profiles_debounce_independently() {
        let mut state = DebounceState::new(5);
        assert!(state.admit(1, SaveEventKind::Modified, 100));
        assert!(state.admit(2, SaveEventKind::Modified, 101));
        assert!(!state.admit(1, SaveEventKind::Modified, 103));
        assert!(!state.admit(2, SaveEventKind::Modified, 103));
    }

    #[test]
    fn test_created_events_bypass_debounce() {
        let mut state = DebounceState::new(5);
        assert!(state.admit(1, SaveEventKind::Modified, 100));
        assert!(state.admit(1, SaveEventKind::Created, 101));
        assert!(state.admit(1, SaveEventKind::Created, 101));
    }

    #[test]
    fn test_separate_instances_do_not_interfere() {
        let mut a = DebounceState::new(5);
        let mut b = DebounceState::new(5);
        assert!(a.admit(1, SaveEventKind::Modified, 100));
        assert!(b.admit(1, SaveEventKind::Modified, 101));
    }

    #[test]
    fn test_overwrite_decision() {
        // Last snapshot at T=100, threshold 5: an event at T=103 refreshes
        // it, an event at T=110 opens a new snapshot.
        assert!(should_overwrite_last(Some(100), 103, 5));
        assert!(should_overwrite_last(Some(100), 105, 5));
        assert!(!should_overwrite_last(Some(100), 110, 5));
        assert!(!should_overwrite_last(None, 103, 5));
    }
}
