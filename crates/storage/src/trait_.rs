//! Storage trait abstraction.

use async_trait::async_trait;
use scavenger_core::{HuntId, HuntPayload, ProgressUpdate, TrackerSnapshot};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Identifier not usable as a storage key
    #[error("Invalid id: {0:?}")]
    InvalidId(String),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// The hunt backend as seen from a client.
///
/// Implementations may talk to a remote service or keep files locally.
#[async_trait]
pub trait HuntStore: Send + Sync {
    // === Hunt operations ===

    /// Load a hunt with its saved index.
    async fn load_hunt(&self, id: &HuntId) -> Result<Option<HuntPayload>>;

    /// Save a hunt (create or replace).
    async fn save_hunt(&self, id: &HuntId, hunt: &HuntPayload) -> Result<()>;

    /// List stored hunt IDs.
    async fn list_hunts(&self) -> Result<Vec<HuntId>>;

    /// Record the index a hunt has reached.
    async fn update_progress(&self, update: &ProgressUpdate) -> Result<()>;

    // === Session operations ===

    /// Load the saved cursor state of a hunt session.
    async fn load_snapshot(&self, id: &HuntId) -> Result<Option<TrackerSnapshot>>;

    /// Save the cursor state of a hunt session.
    async fn save_snapshot(&self, id: &HuntId, snapshot: &TrackerSnapshot) -> Result<()>;
}
