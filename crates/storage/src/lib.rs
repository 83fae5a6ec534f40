//! Storage abstraction and implementations for scavenger hunts.
//!
//! This crate provides the trait-based seams to the hunt backend and the
//! places service, with JSON file reference implementations.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod places;

pub use trait_::{HuntStore, StorageError, Result};
pub use json_storage::JsonStore;
pub use places::{JsonPlaces, PlaceRecord, PlacesProvider};
