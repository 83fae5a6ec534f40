//! Hunt progress tracking.
//!
//! A [`HuntTracker`] owns the stops of one hunt session and the cursors
//! over them. It performs no I/O; callers drive it and sync the index to
//! the backend themselves.
//!
//! ```text
//! NOT_STARTED --start()--> ON_STOP(0) --advance()--> ... --advance()--> COMPLETE
//! ```

use std::collections::HashSet;

use chrono::Utc;
use scavenger_core::{Destination, LatLng, SessionId, Time, TrackerSnapshot, NOT_STARTED_INDEX};
use tracing::{debug, info, warn};

use crate::error::{Result, TrackerError};

/// In-memory state of one hunt session.
#[derive(Debug, Clone)]
pub struct HuntTracker {
    session_id: SessionId,
    stops: Vec<Destination>,

    /// `None` before start, `Some(len)` once complete.
    current: Option<usize>,

    // Per-stop state, reset together on every index change.
    next_hint_index: usize,
    photo_index: usize,
    review_index: usize,
    photos: Option<Vec<String>>,
    reviews: Option<Vec<String>>,
    resolved_place_id: Option<String>,

    position: Option<LatLng>,
    started_at: Option<Time>,
}

impl HuntTracker {
    /// Create a tracker over `stops`, positioned at `initial_index`.
    ///
    /// `initial_index` is `-1` for a fresh hunt, or the saved index when
    /// resuming. A resumed tracker has no start time. Names, and place ids
    /// where present, must be unique across `stops`.
    pub fn new(stops: Vec<Destination>, initial_index: i64) -> Result<Self> {
        if stops.is_empty() {
            return Err(TrackerError::EmptyHunt);
        }
        check_unique(&stops)?;
        let current = cursor_from_index(initial_index, stops.len())?;

        let tracker = Self {
            session_id: SessionId::new(),
            stops,
            current,
            next_hint_index: 0,
            photo_index: 0,
            review_index: 0,
            photos: None,
            reviews: None,
            resolved_place_id: None,
            position: None,
            started_at: None,
        };
        debug!(
            "Session {} created with {} stops at index {}",
            tracker.session_id,
            tracker.stops.len(),
            initial_index
        );
        Ok(tracker)
    }

    /// Rebuild a tracker from a saved snapshot.
    pub fn restore(stops: Vec<Destination>, snapshot: TrackerSnapshot) -> Result<Self> {
        let mut tracker = Self::new(stops, snapshot.index)?;
        if let Some(session_id) = snapshot.session_id {
            tracker.session_id = session_id;
        }

        if let Some(i) = tracker.current.filter(|&i| i < tracker.stops.len()) {
            let hints = tracker.stops[i].hints().len();
            if snapshot.next_hint_index > hints {
                return Err(TrackerError::OutOfRange {
                    index: snapshot.next_hint_index as i64,
                    len: hints,
                });
            }
            tracker.next_hint_index = snapshot.next_hint_index;
            tracker.photo_index = snapshot.photo_index;
            tracker.review_index = snapshot.review_index;
            tracker.resolved_place_id = snapshot.resolved_place_id;
        }
        tracker.position = snapshot.position;
        tracker.started_at = snapshot.started_at;
        Ok(tracker)
    }

    /// Capture the cursor state for later [`HuntTracker::restore`].
    ///
    /// Cached photo and review lists are not kept; they are fetched again.
    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            session_id: Some(self.session_id),
            index: self.current_index(),
            next_hint_index: self.next_hint_index,
            photo_index: self.photo_index,
            review_index: self.review_index,
            resolved_place_id: self.resolved_place_id.clone(),
            position: self.position,
            started_at: self.started_at,
        }
    }

    /// Start the hunt at the first stop.
    pub fn start(&mut self) -> Result<()> {
        if !self.has_not_started() {
            return Err(TrackerError::InvalidState(format!(
                "hunt already started (index {})",
                self.current_index()
            )));
        }
        self.current = Some(0);
        self.reset_stop_state();
        self.started_at = Some(Utc::now());
        info!("Session {} started", self.session_id);
        Ok(())
    }

    /// Move on to the next stop.
    ///
    /// Advancing past the last stop completes the hunt. Advancing a
    /// completed hunt is ignored.
    pub fn advance(&mut self) -> Result<()> {
        let Some(i) = self.current else {
            return Err(TrackerError::InvalidState(
                "cannot advance a hunt that has not started".to_string(),
            ));
        };
        if i >= self.stops.len() {
            warn!("Session {} is already complete, ignoring advance", self.session_id);
            return Ok(());
        }

        self.current = Some(i + 1);
        self.reset_stop_state();

        if self.is_complete() {
            info!("Session {} completed all {} stops", self.session_id, self.stops.len());
        } else {
            debug!("Session {} advanced to stop {}", self.session_id, i + 1);
        }
        Ok(())
    }

    fn reset_stop_state(&mut self) {
        self.next_hint_index = 0;
        self.photo_index = 0;
        self.review_index = 0;
        self.photos = None;
        self.reviews = None;
        self.resolved_place_id = None;
    }

    /// True until [`HuntTracker::start`] is called.
    pub fn has_not_started(&self) -> bool {
        self.current.is_none()
    }

    /// True once every stop has been found.
    pub fn is_complete(&self) -> bool {
        matches!(self.current, Some(i) if i >= self.stops.len())
    }

    /// True while seeking the final stop.
    pub fn is_at_last_stop(&self) -> bool {
        self.current == Some(self.stops.len() - 1)
    }

    /// The stop currently being sought.
    pub fn current_destination(&self) -> Result<&Destination> {
        match self.current {
            Some(i) if i < self.stops.len() => Ok(&self.stops[i]),
            _ => Err(TrackerError::OutOfRange {
                index: self.current_index(),
                len: self.stops.len(),
            }),
        }
    }

    /// The stop at `index`.
    pub fn destination_at(&self, index: usize) -> Result<&Destination> {
        self.stops.get(index).ok_or(TrackerError::OutOfRange {
            index: index as i64,
            len: self.stops.len(),
        })
    }

    /// Reveal the next authored hint for the current stop.
    ///
    /// Returns `None` once the hint list is exhausted.
    pub fn next_hint(&mut self) -> Result<Option<String>> {
        let hint = self
            .current_destination()?
            .hints()
            .get(self.next_hint_index)
            .cloned();
        if hint.is_some() {
            self.next_hint_index += 1;
        }
        Ok(hint)
    }

    /// Hints already revealed for the current stop, in order.
    pub fn revealed_hints(&self) -> &[String] {
        match self.current_destination() {
            Ok(dest) => &dest.hints()[..self.next_hint_index],
            Err(_) => &[],
        }
    }

    /// Stops found so far.
    pub fn found_destinations(&self) -> &[Destination] {
        let found = self.current.unwrap_or(0).min(self.stops.len());
        &self.stops[..found]
    }

    /// Share of stops found, from 0 to 100. Zero before start.
    pub fn progress_percent(&self) -> f64 {
        match self.current {
            Some(i) => i as f64 / self.stops.len() as f64 * 100.0,
            None => 0.0,
        }
    }

    /// Time since the hunt was started.
    pub fn elapsed_since_start(&self) -> Result<chrono::Duration> {
        self.started_at
            .map(|t| Utc::now() - t)
            .ok_or_else(|| TrackerError::InvalidState("hunt has no start time".to_string()))
    }

    /// When the hunt was started, if known.
    pub fn started_at(&self) -> Option<Time> {
        self.started_at
    }

    /// Current index, `-1` before start and the stop count once complete.
    pub fn current_index(&self) -> i64 {
        self.current.map_or(NOT_STARTED_INDEX, |i| i as i64)
    }

    /// Index of the next authored hint.
    pub fn next_hint_index(&self) -> usize {
        self.next_hint_index
    }

    /// All stops, in order.
    pub fn stops(&self) -> &[Destination] {
        &self.stops
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always false; a tracker holds at least one stop.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Identifier of this session.
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    // === Position ===

    /// Record the user's last known position.
    pub fn set_position(&mut self, lat: f64, lng: f64) {
        self.position = Some(LatLng::new(lat, lng));
    }

    /// Last known user position.
    pub fn position(&self) -> Option<LatLng> {
        self.position
    }

    // === Auto-hint state ===

    /// Cache the place id resolved for the current stop.
    pub fn set_resolved_place_id(&mut self, place_id: impl Into<String>) {
        self.resolved_place_id = Some(place_id.into());
    }

    /// Place id resolved for the current stop.
    pub fn resolved_place_id(&self) -> Option<&str> {
        self.resolved_place_id.as_deref()
    }

    /// Next photo cursor.
    pub fn photo_index(&self) -> usize {
        self.photo_index
    }

    /// Next review cursor.
    pub fn review_index(&self) -> usize {
        self.review_index
    }

    /// Cache the photos fetched for the current stop.
    pub fn set_photos(&mut self, photos: Vec<String>) {
        self.photos = Some(photos);
    }

    /// Cache the reviews fetched for the current stop.
    pub fn set_reviews(&mut self, reviews: Vec<String>) {
        self.reviews = Some(reviews);
    }

    /// Cached photos, `None` if not fetched yet.
    pub fn photos(&self) -> Option<&[String]> {
        self.photos.as_deref()
    }

    /// Cached reviews, `None` if not fetched yet.
    pub fn reviews(&self) -> Option<&[String]> {
        self.reviews.as_deref()
    }

    /// Take the next cached photo and move the cursor.
    pub fn next_photo(&mut self) -> Option<String> {
        let photo = self.photos.as_ref()?.get(self.photo_index).cloned()?;
        self.photo_index += 1;
        Some(photo)
    }

    /// Take the next cached review and move the cursor.
    pub fn next_review(&mut self) -> Option<String> {
        let review = self.reviews.as_ref()?.get(self.review_index).cloned()?;
        self.review_index += 1;
        Some(review)
    }
}

fn check_unique(stops: &[Destination]) -> Result<()> {
    let mut names = HashSet::new();
    let mut place_ids = HashSet::new();
    for dest in stops {
        if !names.insert(dest.name()) {
            return Err(TrackerError::DuplicateDestination(format!("name {}", dest.name())));
        }
        if let Some(place_id) = dest.place_id() {
            if !place_ids.insert(place_id) {
                return Err(TrackerError::DuplicateDestination(format!("place id {}", place_id)));
            }
        }
    }
    Ok(())
}

fn cursor_from_index(index: i64, len: usize) -> Result<Option<usize>> {
    match index {
        NOT_STARTED_INDEX => Ok(None),
        i if i >= 0 && i as usize <= len => Ok(Some(i as usize)),
        i => Err(TrackerError::OutOfRange { index: i, len }),
    }
}
