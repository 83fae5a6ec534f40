//! Scavenger hunt core data models.
//!
//! This crate defines the destinations a hunt is made of and the payloads
//! exchanged with the hunt backend.

#![warn(missing_docs)]

// Core identities
mod id;

// Hunt content
mod destination;
mod payload;
mod snapshot;

// Re-exports
pub use id::*;

pub use destination::{Destination, LatLng, Riddle};
pub use payload::{HuntItem, HuntPayload, ProgressUpdate, NOT_STARTED_INDEX};
pub use snapshot::TrackerSnapshot;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
