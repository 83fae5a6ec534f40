//! JSON file storage implementation.
//!
//! Stores hunts as `hunts/<id>.json` and session cursors as
//! `sessions/<id>.json` under a root directory.

use std::path::{Path, PathBuf};
use scavenger_core::{HuntId, HuntPayload, ProgressUpdate, TrackerSnapshot};
use super::{HuntStore, StorageError, Result};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

/// File-based JSON storage backend.
pub struct JsonStore {
    root: PathBuf,
    // Serializes read-modify-write cycles on hunt files.
    write_lock: Mutex<()>,
}

impl JsonStore {
    /// Create storage, making the `hunts/` and `sessions/` directories.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("hunts")).await?;
        fs::create_dir_all(root.join("sessions")).await?;

        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    /// Root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn hunt_path(&self, id: &HuntId) -> Result<PathBuf> {
        Ok(self.root.join("hunts").join(format!("{}.json", file_stem(id)?)))
    }

    fn session_path(&self, id: &HuntId) -> Result<PathBuf> {
        Ok(self.root.join("sessions").join(format!("{}.json", file_stem(id)?)))
    }
}

#[async_trait::async_trait]
impl HuntStore for JsonStore {
    async fn load_hunt(&self, id: &HuntId) -> Result<Option<HuntPayload>> {
        read_json(&self.hunt_path(id)?).await
    }

    async fn save_hunt(&self, id: &HuntId, hunt: &HuntPayload) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        write_json(&self.hunt_path(id)?, hunt).await
    }

    async fn list_hunts(&self) -> Result<Vec<HuntId>> {
        let mut ids = Vec::new();
        let mut rd = fs::read_dir(self.root.join("hunts")).await?;
        while let Some(entry) = rd.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(HuntId::new(stem));
            }
        }
        ids.sort();
        Ok(ids)
    }

    async fn update_progress(&self, update: &ProgressUpdate) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let path = self.hunt_path(&update.hunt_id)?;
        let Some(mut hunt) = read_json::<HuntPayload>(&path).await? else {
            return Err(StorageError::NotFound(format!("hunt {}", update.hunt_id)));
        };
        hunt.index = update.index;
        write_json(&path, &hunt).await?;
        debug!("Hunt {} progress saved at index {}", update.hunt_id, update.index);
        Ok(())
    }

    async fn load_snapshot(&self, id: &HuntId) -> Result<Option<TrackerSnapshot>> {
        read_json(&self.session_path(id)?).await
    }

    async fn save_snapshot(&self, id: &HuntId, snapshot: &TrackerSnapshot) -> Result<()> {
        write_json(&self.session_path(id)?, snapshot).await
    }
}

// Hunt ids become file names and must stay inside the store directory.
fn file_stem(id: &HuntId) -> Result<&str> {
    let s = id.as_str();
    if s.is_empty() || s == "." || s == ".." || s.contains(['/', '\\']) {
        return Err(StorageError::InvalidId(s.to_string()));
    }
    Ok(s)
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json.as_bytes()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scavenger_core::{HuntItem, LatLng, Riddle};

    fn sample_hunt() -> HuntPayload {
        HuntPayload {
            index: -1,
            items: vec![HuntItem {
                name: "Union Square".to_string(),
                description: "Plaza downtown.".to_string(),
                riddle: Riddle {
                    puzzle: "Shoppers gather around my column.".to_string(),
                    hints: vec!["Dewey monument".to_string()],
                },
                location: LatLng::new(37.788, -122.4075),
                place_id: None,
            }],
        }
    }

    #[tokio::test]
    async fn test_save_and_load_hunt() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).await.unwrap();
        let id = HuntId::new("1");

        assert!(store.load_hunt(&id).await.unwrap().is_none());

        store.save_hunt(&id, &sample_hunt()).await.unwrap();
        let loaded = store.load_hunt(&id).await.unwrap().unwrap();
        assert_eq!(loaded, sample_hunt());
    }

    #[tokio::test]
    async fn test_update_progress_rewrites_index() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).await.unwrap();
        let id = HuntId::new("7");
        store.save_hunt(&id, &sample_hunt()).await.unwrap();

        store
            .update_progress(&ProgressUpdate::new(id.clone(), 0))
            .await
            .unwrap();

        let loaded = store.load_hunt(&id).await.unwrap().unwrap();
        assert_eq!(loaded.index, 0);
        assert_eq!(loaded.items.len(), 1);
    }

    #[tokio::test]
    async fn test_update_progress_unknown_hunt() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).await.unwrap();

        let err = store
            .update_progress(&ProgressUpdate::new(HuntId::new("missing"), 2))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_hunts_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).await.unwrap();
        store.save_hunt(&HuntId::new("b"), &sample_hunt()).await.unwrap();
        store.save_hunt(&HuntId::new("a"), &sample_hunt()).await.unwrap();

        let ids = store.list_hunts().await.unwrap();
        assert_eq!(ids, vec![HuntId::new("a"), HuntId::new("b")]);
    }

    #[tokio::test]
    async fn test_rejects_ids_escaping_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("data")).await.unwrap();

        for bad in ["../x", "a/b", "a\\b", "..", ""] {
            let id = HuntId::new(bad);
            let err = store.save_hunt(&id, &sample_hunt()).await.unwrap_err();
            assert!(matches!(err, StorageError::InvalidId(_)), "{bad} accepted");
            assert!(matches!(
                store.load_snapshot(&id).await,
                Err(StorageError::InvalidId(_))
            ));
        }
        assert!(!dir.path().join("data").join("x.json").exists());
        assert!(!dir.path().join("x.json").exists());
    }

    #[tokio::test]
    async fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).await.unwrap();
        let id = HuntId::new("3");

        let snapshot = TrackerSnapshot {
            index: 0,
            next_hint_index: 1,
            resolved_place_id: Some("place".to_string()),
            started_at: Some(chrono::Utc::now()),
            ..Default::default()
        };
        store.save_snapshot(&id, &snapshot).await.unwrap();

        let loaded = store.load_snapshot(&id).await.unwrap().unwrap();
        assert_eq!(loaded, snapshot);
    }
}
