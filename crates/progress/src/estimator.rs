//! Completion time estimation.

use chrono::{Duration, Utc};
use scavenger_core::Time;

use crate::tracker::HuntTracker;

/// Estimates how long the rest of a hunt will take from the pace so far.
#[derive(Debug, Default)]
pub struct PaceEstimator;

impl PaceEstimator {
    /// Estimated time left, measured now.
    pub fn estimate_remaining(&self, tracker: &HuntTracker) -> Option<Duration> {
        self.estimate_remaining_at(tracker, Utc::now())
    }

    /// Estimated time left as of `now`.
    ///
    /// Average time per found stop times the stops still to find. `None`
    /// until a stop is found or when the start time is unknown.
    pub fn estimate_remaining_at(&self, tracker: &HuntTracker, now: Time) -> Option<Duration> {
        if tracker.is_complete() {
            return Some(Duration::zero());
        }
        let started_at = tracker.started_at()?;
        let found = tracker.found_destinations().len() as i32;
        if found == 0 {
            return None;
        }

        let per_stop = (now - started_at) / found;
        let remaining = tracker.len() as i32 - found;
        Some(per_stop * remaining)
    }

    /// Estimated finish time.
    pub fn estimate_finish(&self, tracker: &HuntTracker) -> Option<Time> {
        let now = Utc::now();
        self.estimate_remaining_at(tracker, now).map(|left| now + left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scavenger_core::{Destination, LatLng, TrackerSnapshot};

    fn tracker_at(index: i64, started_at: Option<Time>, stops: usize) -> HuntTracker {
        let stops = (0..stops)
            .map(|i| Destination::new(format!("Stop {}", i), "", "", vec![], LatLng::new(0.0, 0.0)))
            .collect();
        HuntTracker::restore(
            stops,
            TrackerSnapshot {
                index,
                started_at,
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_estimate_from_pace() {
        let now = Utc::now();
        let tracker = tracker_at(2, Some(now - Duration::minutes(20)), 4);
        let left = PaceEstimator.estimate_remaining_at(&tracker, now).unwrap();
        assert_eq!(left, Duration::minutes(20));
    }

    #[test]
    fn test_no_estimate_before_first_find() {
        let now = Utc::now();
        let tracker = tracker_at(0, Some(now), 3);
        assert!(PaceEstimator.estimate_remaining_at(&tracker, now).is_none());
    }

    #[test]
    fn test_no_estimate_without_start_time() {
        let tracker = tracker_at(1, None, 3);
        assert!(PaceEstimator.estimate_remaining(&tracker).is_none());
        assert!(PaceEstimator.estimate_finish(&tracker).is_none());
    }

    #[test]
    fn test_complete_hunt_has_nothing_left() {
        let tracker = tracker_at(3, None, 3);
        assert_eq!(PaceEstimator.estimate_remaining(&tracker), Some(Duration::zero()));
    }
}
