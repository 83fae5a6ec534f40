//! Payloads exchanged with the hunt backend.

use crate::destination::{Destination, LatLng, Riddle};
use crate::id::HuntId;
use serde::{Deserialize, Serialize};

/// Index the backend reports for a hunt nobody has started yet.
pub const NOT_STARTED_INDEX: i64 = -1;

/// One item of a hunt as the backend sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HuntItem {
    /// Destination name
    pub name: String,

    /// Description shown after the destination is found
    #[serde(default)]
    pub description: String,

    /// Puzzle and hints
    pub riddle: Riddle,

    /// Coordinates
    pub location: LatLng,

    /// External place reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
}

impl From<HuntItem> for Destination {
    fn from(item: HuntItem) -> Self {
        let dest = Destination::new(
            item.name,
            item.description,
            item.riddle.puzzle,
            item.riddle.hints,
            item.location,
        );
        match item.place_id {
            Some(place_id) => dest.with_place_id(place_id),
            None => dest,
        }
    }
}

/// Response of the "get hunt" call: the stops and the saved position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HuntPayload {
    /// Index of the destination the user currently needs to find
    #[serde(default = "not_started")]
    pub index: i64,

    /// Hunt stops in order
    pub items: Vec<HuntItem>,
}

fn not_started() -> i64 {
    NOT_STARTED_INDEX
}

impl HuntPayload {
    /// Parse a payload from its JSON text.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Split into destinations and the saved index.
    pub fn into_parts(self) -> (Vec<Destination>, i64) {
        let stops = self.items.into_iter().map(Destination::from).collect();
        (stops, self.index)
    }
}

/// State-sync message sent whenever the current index changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Hunt being played
    pub hunt_id: HuntId,

    /// New current index
    #[serde(rename = "new-index")]
    pub index: i64,
}

impl ProgressUpdate {
    /// Create a progress update.
    pub fn new(hunt_id: HuntId, index: i64) -> Self {
        Self { hunt_id, index }
    }
}
