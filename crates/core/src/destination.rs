//! Destination model - one stop of a hunt.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

impl LatLng {
    /// Create a coordinate.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// The riddle attached to a destination: a primary puzzle plus hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Riddle {
    /// Primary riddle text
    pub puzzle: String,

    /// Hints, revealed in order
    #[serde(default)]
    pub hints: Vec<String>,
}

/// One stop of a hunt.
///
/// Destinations are immutable once built. The name doubles as the answer
/// key when checking a guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    name: String,
    description: String,
    puzzle: String,
    hints: Vec<String>,
    location: LatLng,
    place_id: Option<String>,
}

impl Destination {
    /// Create a new destination without a place reference.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        puzzle: impl Into<String>,
        hints: Vec<String>,
        location: LatLng,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            puzzle: puzzle.into(),
            hints,
            location,
            place_id: None,
        }
    }

    /// Attach an external place reference.
    pub fn with_place_id(mut self, place_id: impl Into<String>) -> Self {
        self.place_id = Some(place_id.into());
        self
    }

    /// Destination name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text revealed once the destination is found.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Primary riddle.
    pub fn puzzle(&self) -> &str {
        &self.puzzle
    }

    /// Ordered hints.
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// Coordinates of the destination.
    pub fn location(&self) -> LatLng {
        self.location
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.location.lat
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.location.lng
    }

    /// External place reference, if one was resolved when the hunt was built.
    pub fn place_id(&self) -> Option<&str> {
        self.place_id.as_deref()
    }

    /// Exact, case-sensitive comparison against the destination name.
    pub fn matches_name(&self, candidate: &str) -> bool {
        self.name == candidate
    }
}
