//! Resumable tracker state.

use crate::destination::LatLng;
use crate::id::SessionId;
use crate::payload::NOT_STARTED_INDEX;
use crate::Time;
use serde::{Deserialize, Serialize};

/// Cursor state of a hunt session, detached from its destinations.
///
/// Stored between runs so a session can pick up where it left off,
/// including hints already revealed for the current stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerSnapshot {
    /// Playthrough the state belongs to
    #[serde(default)]
    pub session_id: Option<SessionId>,

    /// Current index, `-1` before start
    pub index: i64,

    /// Next hint to reveal for the current stop
    #[serde(default)]
    pub next_hint_index: usize,

    /// Next photo to show for the current stop
    #[serde(default)]
    pub photo_index: usize,

    /// Next review to show for the current stop
    #[serde(default)]
    pub review_index: usize,

    /// Place id resolved for the current stop
    #[serde(default)]
    pub resolved_place_id: Option<String>,

    /// Last known user position
    #[serde(default)]
    pub position: Option<LatLng>,

    /// When the hunt was started
    #[serde(default)]
    pub started_at: Option<Time>,
}

impl Default for TrackerSnapshot {
    fn default() -> Self {
        Self {
            session_id: None,
            index: NOT_STARTED_INDEX,
            next_hint_index: 0,
            photo_index: 0,
            review_index: 0,
            resolved_place_id: None,
            position: None,
            started_at: None,
        }
    }
}
