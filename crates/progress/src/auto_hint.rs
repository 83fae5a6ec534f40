//! Auto-generated hints from a places service.
//!
//! Once the authored hints run out, a player can ask for photos and
//! reviews of the current destination. The place id is resolved once per
//! stop, media lists are fetched lazily, and each request picks photo or
//! review with a fair coin.

use rand::Rng;
use scavenger_storage::PlacesProvider;
use tokio::sync::Mutex;
use tracing::debug;

use crate::tracker::HuntTracker;

/// A supplemental hint taken from the places service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoHint {
    /// Photo reference
    Photo(String),
    /// Review text
    Review(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MediaKind {
    Photo,
    Review,
}

impl MediaKind {
    fn other(self) -> Self {
        match self {
            MediaKind::Photo => MediaKind::Review,
            MediaKind::Review => MediaKind::Photo,
        }
    }
}

/// Produces auto hints for the tracker's current stop.
pub struct AutoHinter<P> {
    places: P,
}

impl<P: PlacesProvider> AutoHinter<P> {
    /// Create a hinter over a places provider.
    pub fn new(places: P) -> Self {
        Self { places }
    }

    /// Produce the next auto hint for the current stop.
    ///
    /// Returns `None` when the place is unknown, both media lists are
    /// exhausted, or the tracker moved to another stop while the places
    /// service was being queried.
    pub async fn next_hint<R: Rng>(
        &self,
        tracker: &Mutex<HuntTracker>,
        rng: &mut R,
    ) -> anyhow::Result<Option<AutoHint>> {
        let first = if rng.gen_bool(0.5) {
            MediaKind::Photo
        } else {
            MediaKind::Review
        };

        let (destination, index, place_id) = {
            let t = tracker.lock().await;
            (
                t.current_destination()?.clone(),
                t.current_index(),
                t.resolved_place_id().map(str::to_string),
            )
        };

        let place_id = match place_id {
            Some(id) => id,
            None => {
                let resolved = self.places.resolve_place_id(&destination).await?;
                let mut t = tracker.lock().await;
                if t.current_index() != index {
                    debug!("Discarding place id for {}, stop changed", destination.name());
                    return Ok(None);
                }
                let Some(id) = resolved else {
                    debug!("No place known for {}", destination.name());
                    return Ok(None);
                };
                t.set_resolved_place_id(id.clone());
                id
            }
        };

        for kind in [first, first.other()] {
            let cached = {
                let t = tracker.lock().await;
                match kind {
                    MediaKind::Photo => t.photos().is_some(),
                    MediaKind::Review => t.reviews().is_some(),
                }
            };

            let fetched = if cached {
                None
            } else {
                Some(match kind {
                    MediaKind::Photo => self.places.photos(&place_id).await?,
                    MediaKind::Review => self.places.reviews(&place_id).await?,
                })
            };

            let mut t = tracker.lock().await;
            if t.current_index() != index {
                debug!("Discarding media for {}, stop changed", destination.name());
                return Ok(None);
            }
            match (kind, fetched) {
                (MediaKind::Photo, Some(photos)) => t.set_photos(photos),
                (MediaKind::Review, Some(reviews)) => t.set_reviews(reviews),
                (_, None) => {}
            }

            let hint = match kind {
                MediaKind::Photo => t.next_photo().map(AutoHint::Photo),
                MediaKind::Review => t.next_review().map(AutoHint::Review),
            };
            if hint.is_some() {
                return Ok(hint);
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use scavenger_core::{Destination, LatLng};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FakePlaces {
        resolves: AtomicUsize,
        fetches: AtomicUsize,
        // Advanced during resolution to simulate the player moving on.
        advance_on_resolve: Option<Arc<Mutex<HuntTracker>>>,
    }

    impl FakePlaces {
        fn new() -> Self {
            Self {
                resolves: AtomicUsize::new(0),
                fetches: AtomicUsize::new(0),
                advance_on_resolve: None,
            }
        }
    }

    #[async_trait::async_trait]
    impl PlacesProvider for FakePlaces {
        async fn resolve_place_id(&self, destination: &Destination) -> anyhow::Result<Option<String>> {
            self.resolves.fetch_add(1, Ordering::SeqCst);
            if let Some(tracker) = &self.advance_on_resolve {
                tracker.lock().await.advance()?;
            }
            if destination.name() == "Unknown" {
                return Ok(None);
            }
            Ok(Some(format!("place-{}", destination.name())))
        }

        async fn photos(&self, _place_id: &str) -> anyhow::Result<Vec<String>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(vec!["p1".to_string(), "p2".to_string()])
        }

        async fn reviews(&self, _place_id: &str) -> anyhow::Result<Vec<String>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(vec!["r1".to_string()])
        }
    }

    fn tracker(names: &[&str]) -> Arc<Mutex<HuntTracker>> {
        let stops = names
            .iter()
            .map(|n| Destination::new(*n, "", "", vec![], LatLng::new(0.0, 0.0)))
            .collect();
        let mut tracker = HuntTracker::new(stops, -1).unwrap();
        tracker.start().unwrap();
        Arc::new(Mutex::new(tracker))
    }

    #[tokio::test]
    async fn test_drains_both_media_lists_once() {
        let tracker = tracker(&["Alcatraz"]);
        let hinter = AutoHinter::new(FakePlaces::new());
        let mut rng = StdRng::seed_from_u64(7);

        let mut hints = Vec::new();
        while let Some(hint) = hinter.next_hint(&tracker, &mut rng).await.unwrap() {
            hints.push(hint);
        }

        assert_eq!(hints.len(), 3);
        assert!(hints.contains(&AutoHint::Photo("p1".to_string())));
        assert!(hints.contains(&AutoHint::Photo("p2".to_string())));
        assert!(hints.contains(&AutoHint::Review("r1".to_string())));

        let photo_pos = |p: &str| hints.iter().position(|h| h == &AutoHint::Photo(p.to_string()));
        assert!(photo_pos("p1") < photo_pos("p2"));

        assert_eq!(hinter.places.resolves.load(Ordering::SeqCst), 1);
        assert_eq!(hinter.places.fetches.load(Ordering::SeqCst), 2);

        let t = tracker.lock().await;
        assert_eq!(t.resolved_place_id(), Some("place-Alcatraz"));
        assert_eq!(t.photo_index(), 2);
        assert_eq!(t.review_index(), 1);
    }

    #[tokio::test]
    async fn test_unknown_place_gives_no_hint() {
        let tracker = tracker(&["Unknown"]);
        let hinter = AutoHinter::new(FakePlaces::new());
        let mut rng = StdRng::seed_from_u64(1);

        assert!(hinter.next_hint(&tracker, &mut rng).await.unwrap().is_none());
        assert!(tracker.lock().await.resolved_place_id().is_none());
    }

    #[tokio::test]
    async fn test_stale_resolution_is_discarded() {
        let tracker = tracker(&["Alcatraz", "Lombard Street"]);
        let mut places = FakePlaces::new();
        places.advance_on_resolve = Some(tracker.clone());
        let hinter = AutoHinter::new(places);
        let mut rng = StdRng::seed_from_u64(3);

        assert!(hinter.next_hint(&tracker, &mut rng).await.unwrap().is_none());

        let t = tracker.lock().await;
        assert_eq!(t.current_index(), 1);
        assert!(t.resolved_place_id().is_none());
        assert_eq!(hinter.places.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_requires_current_stop() {
        let tracker = tracker(&["Alcatraz"]);
        tracker.lock().await.advance().unwrap();
        let hinter = AutoHinter::new(FakePlaces::new());
        let mut rng = StdRng::seed_from_u64(0);

        assert!(hinter.next_hint(&tracker, &mut rng).await.is_err());
    }
}
