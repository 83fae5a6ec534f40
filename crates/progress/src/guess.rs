//! Guess checking.

use std::collections::HashSet;

use crate::error::Result;
use crate::tracker::HuntTracker;

/// Decides whether a guess names the answer.
pub trait AnswerMatcher: Send + Sync {
    /// True if `guess` should be accepted for `answer`.
    fn matches(&self, guess: &str, answer: &str) -> bool;
}

/// Byte-exact, case-sensitive comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl AnswerMatcher for ExactMatcher {
    fn matches(&self, guess: &str, answer: &str) -> bool {
        guess == answer
    }
}

/// Accepts a guess that mentions every word of the answer.
///
/// Case and punctuation are ignored, and extra words in the guess are
/// allowed: "the golden gate bridge!" matches "Golden Gate Bridge".
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityMatcher;

impl EntityMatcher {
    fn entities(text: &str) -> HashSet<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(|w| w.to_lowercase())
            .collect()
    }
}

impl AnswerMatcher for EntityMatcher {
    fn matches(&self, guess: &str, answer: &str) -> bool {
        let wanted = Self::entities(answer);
        if wanted.is_empty() {
            return false;
        }
        let given = Self::entities(guess);
        wanted.is_subset(&given)
    }
}

/// Result of checking a guess against the current stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The guess names the current destination
    Correct,
    /// The guess does not match
    Wrong,
    /// Nothing was entered
    Empty,
}

impl GuessOutcome {
    /// Message shown to the player.
    pub fn message(&self) -> &'static str {
        match self {
            GuessOutcome::Correct => "Correct!",
            GuessOutcome::Wrong => "Wrong. Try again!",
            GuessOutcome::Empty => "",
        }
    }
}

/// Check `guess` against the tracker's current destination.
///
/// Does not advance the tracker.
pub fn check_guess(
    tracker: &HuntTracker,
    matcher: &dyn AnswerMatcher,
    guess: &str,
) -> Result<GuessOutcome> {
    let answer = tracker.current_destination()?.name();
    if guess.trim().is_empty() {
        return Ok(GuessOutcome::Empty);
    }
    Ok(if matcher.matches(guess, answer) {
        GuessOutcome::Correct
    } else {
        GuessOutcome::Wrong
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TrackerError;
    use scavenger_core::{Destination, LatLng};

    fn tracker() -> HuntTracker {
        let stops = vec![Destination::new(
            "Eiffel Tower",
            "Wrought-iron lattice tower.",
            "I was meant to be temporary.",
            vec![],
            LatLng::new(48.8584, 2.2945),
        )];
        HuntTracker::new(stops, 0).unwrap()
    }

    #[test]
    fn test_exact_matcher() {
        assert!(ExactMatcher.matches("Eiffel Tower", "Eiffel Tower"));
        assert!(!ExactMatcher.matches("eiffel tower", "Eiffel Tower"));
        assert!(!ExactMatcher.matches(" Eiffel Tower", "Eiffel Tower"));
    }

    #[test]
    fn test_entity_matcher() {
        assert!(EntityMatcher.matches("the eiffel tower!", "Eiffel Tower"));
        assert!(EntityMatcher.matches("TOWER eiffel", "Eiffel Tower"));
        assert!(!EntityMatcher.matches("eiffel", "Eiffel Tower"));
        assert!(!EntityMatcher.matches("anything", ""));
    }

    #[test]
    fn test_check_guess_outcomes() {
        let tracker = tracker();
        assert_eq!(
            check_guess(&tracker, &ExactMatcher, "Eiffel Tower").unwrap(),
            GuessOutcome::Correct
        );
        assert_eq!(
            check_guess(&tracker, &ExactMatcher, "Louvre").unwrap(),
            GuessOutcome::Wrong
        );
        assert_eq!(
            check_guess(&tracker, &ExactMatcher, "   ").unwrap(),
            GuessOutcome::Empty
        );
    }

    #[test]
    fn test_check_guess_requires_current_stop() {
        let stops = tracker().stops().to_vec();
        let tracker = HuntTracker::new(stops, -1).unwrap();
        assert!(matches!(
            check_guess(&tracker, &ExactMatcher, "Eiffel Tower"),
            Err(TrackerError::OutOfRange { .. })
        ));
    }
}
