//! Tracker error types.

/// Error type for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Contract violations raised by [`crate::HuntTracker`].
///
/// These indicate a caller skipped a guard such as `has_not_started()` or
/// `is_complete()`; they are not expected during normal play.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrackerError {
    /// Operation not allowed in the current state
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Index outside the stop list
    #[error("index {index} out of range for hunt with {len} stops")]
    OutOfRange {
        /// Requested index
        index: i64,
        /// Number of stops
        len: usize,
    },

    /// A hunt needs at least one stop
    #[error("a hunt needs at least one destination")]
    EmptyHunt,

    /// Two stops share a name or a place id
    #[error("duplicate destination: {0}")]
    DuplicateDestination(String),
}
