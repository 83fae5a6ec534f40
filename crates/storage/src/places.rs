//! Places service seam used for auto-generated hints.

use std::collections::HashMap;
use std::path::Path;
use async_trait::async_trait;
use scavenger_core::Destination;
use serde::{Deserialize, Serialize};
use tokio::fs;

/// External places-style service that supplies photos and reviews.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Resolve the place id for a destination, if the service knows it.
    async fn resolve_place_id(&self, destination: &Destination) -> anyhow::Result<Option<String>>;

    /// Photo references for a place.
    async fn photos(&self, place_id: &str) -> anyhow::Result<Vec<String>>;

    /// Review texts for a place.
    async fn reviews(&self, place_id: &str) -> anyhow::Result<Vec<String>>;
}

/// Places data for one destination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// Place id
    pub place_id: String,
    /// Photo references
    #[serde(default)]
    pub photos: Vec<String>,
    /// Review texts
    #[serde(default)]
    pub reviews: Vec<String>,
}

/// Places provider backed by a JSON file mapping destination names to records.
#[derive(Debug, Clone, Default)]
pub struct JsonPlaces {
    by_name: HashMap<String, PlaceRecord>,
}

impl JsonPlaces {
    /// Build from in-memory records.
    pub fn new(by_name: HashMap<String, PlaceRecord>) -> Self {
        Self { by_name }
    }

    /// Load from `path`. A missing file yields an empty provider.
    pub async fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        match fs::read_to_string(path.as_ref()).await {
            Ok(json) => Ok(Self::new(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn record(&self, place_id: &str) -> Option<&PlaceRecord> {
        self.by_name.values().find(|r| r.place_id == place_id)
    }
}

#[async_trait]
impl PlacesProvider for JsonPlaces {
    async fn resolve_place_id(&self, destination: &Destination) -> anyhow::Result<Option<String>> {
        if let Some(id) = destination.place_id() {
            return Ok(Some(id.to_string()));
        }
        Ok(self.by_name.get(destination.name()).map(|r| r.place_id.clone()))
    }

    async fn photos(&self, place_id: &str) -> anyhow::Result<Vec<String>> {
        Ok(self.record(place_id).map(|r| r.photos.clone()).unwrap_or_default())
    }

    async fn reviews(&self, place_id: &str) -> anyhow::Result<Vec<String>> {
        Ok(self.record(place_id).map(|r| r.reviews.clone()).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scavenger_core::LatLng;

    fn places() -> JsonPlaces {
        let mut map = HashMap::new();
        map.insert(
            "Palace of Fine Arts".to_string(),
            PlaceRecord {
                place_id: "pofa".to_string(),
                photos: vec!["photo-1".to_string()],
                reviews: vec!["Beautiful rotunda".to_string()],
            },
        );
        JsonPlaces::new(map)
    }

    fn dest(name: &str) -> Destination {
        Destination::new(name, "", "", vec![], LatLng::new(37.80, -122.45))
    }

    #[tokio::test]
    async fn test_resolve_by_name() {
        let places = places();
        let id = places.resolve_place_id(&dest("Palace of Fine Arts")).await.unwrap();
        assert_eq!(id.as_deref(), Some("pofa"));
        assert!(places.resolve_place_id(&dest("Nowhere")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_destination_place_id_wins() {
        let places = places();
        let id = places
            .resolve_place_id(&dest("Nowhere").with_place_id("given"))
            .await
            .unwrap();
        assert_eq!(id.as_deref(), Some("given"));
    }

    #[tokio::test]
    async fn test_media_lookup() {
        let places = places();
        assert_eq!(places.photos("pofa").await.unwrap(), vec!["photo-1"]);
        assert_eq!(places.reviews("pofa").await.unwrap(), vec!["Beautiful rotunda"]);
        assert!(places.photos("unknown").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let places = JsonPlaces::load(dir.path().join("places.json")).await.unwrap();
        assert!(places.photos("pofa").await.unwrap().is_empty());
    }
}
