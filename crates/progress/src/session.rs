//! Hunt session: one tracker bound to the backend that stores its hunt.

use std::sync::Arc;

use anyhow::Context;
use scavenger_core::{HuntId, ProgressUpdate};
use scavenger_storage::HuntStore;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::guess::{check_guess, AnswerMatcher, GuessOutcome};
use crate::tracker::HuntTracker;

/// Tracker handle shared between the UI driver and in-flight requests.
pub type SharedTracker = Arc<Mutex<HuntTracker>>;

/// A hunt being played, owning exactly one tracker.
pub struct HuntSession<S: HuntStore> {
    hunt_id: HuntId,
    tracker: SharedTracker,
    store: Arc<S>,
}

impl<S: HuntStore> HuntSession<S> {
    /// Bind a tracker to the store holding its hunt.
    pub fn new(hunt_id: HuntId, tracker: HuntTracker, store: Arc<S>) -> Self {
        Self {
            hunt_id,
            tracker: Arc::new(Mutex::new(tracker)),
            store,
        }
    }

    /// Load a hunt and resume it.
    ///
    /// A saved snapshot is used when it agrees with the backend's index;
    /// otherwise the tracker starts fresh at that index.
    pub async fn open(store: Arc<S>, hunt_id: HuntId) -> anyhow::Result<Self> {
        let payload = store
            .load_hunt(&hunt_id)
            .await?
            .with_context(|| format!("hunt {} not found", hunt_id))?;
        let (stops, index) = payload.into_parts();

        let tracker = match store.load_snapshot(&hunt_id).await? {
            Some(snapshot) if snapshot.index == index => {
                debug!("Resuming hunt {} from snapshot", hunt_id);
                HuntTracker::restore(stops, snapshot)?
            }
            _ => HuntTracker::new(stops, index)?,
        };

        Ok(Self::new(hunt_id, tracker, store))
    }

    /// Hunt being played.
    pub fn hunt_id(&self) -> &HuntId {
        &self.hunt_id
    }

    /// Shared tracker handle.
    pub fn tracker(&self) -> SharedTracker {
        self.tracker.clone()
    }

    /// Start the hunt and sync the new index.
    pub async fn start(&self) -> Result<()> {
        // Held across the sync so updates reach the store in index order.
        let mut tracker = self.tracker.lock().await;
        tracker.start()?;
        self.sync_index(tracker.current_index()).await;
        Ok(())
    }

    /// Move to the next stop and sync the new index.
    pub async fn advance(&self) -> Result<()> {
        let mut tracker = self.tracker.lock().await;
        tracker.advance()?;
        self.sync_index(tracker.current_index()).await;
        Ok(())
    }

    /// Check a guess against the current destination.
    ///
    /// The caller decides whether to [`HuntSession::advance`] on a correct
    /// guess.
    pub async fn submit_guess(
        &self,
        matcher: &dyn AnswerMatcher,
        guess: &str,
    ) -> Result<GuessOutcome> {
        let tracker = self.tracker.lock().await;
        let outcome = check_guess(&tracker, matcher, guess)?;
        debug!("Guess for hunt {} at index {}: {:?}", self.hunt_id, tracker.current_index(), outcome);
        Ok(outcome)
    }

    /// Persist the tracker's cursor state.
    pub async fn save(&self) -> scavenger_storage::Result<()> {
        let snapshot = self.tracker.lock().await.snapshot();
        self.store.save_snapshot(&self.hunt_id, &snapshot).await
    }

    // Acknowledgement is not consumed; a failed sync leaves tracker state as is.
    async fn sync_index(&self, index: i64) {
        let update = ProgressUpdate::new(self.hunt_id.clone(), index);
        match self.store.update_progress(&update).await {
            Ok(()) => info!("Hunt {} now at index {}", self.hunt_id, index),
            Err(e) => warn!("Failed to sync progress of hunt {}: {}", self.hunt_id, e),
        }
    }
}
