//! Hunt progress tracking.
//!
//! The in-memory tracker for one hunt session, plus the pieces that drive
//! it: guess checking, auto hints, backend sync and pace estimation.

#![warn(missing_docs)]

pub mod error;
pub mod tracker;
pub mod guess;
pub mod auto_hint;
pub mod session;
pub mod estimator;

pub use error::{Result, TrackerError};
pub use tracker::HuntTracker;
pub use guess::{check_guess, AnswerMatcher, EntityMatcher, ExactMatcher, GuessOutcome};
pub use auto_hint::{AutoHint, AutoHinter};
pub use session::{HuntSession, SharedTracker};
pub use estimator::PaceEstimator;
