//! JSON file storage implementation.
//!
//! Stores the snapshot as a single pretty-printed JSON file under the
//! data root - the durable equivalent of a fixed key-value slot.

use std::path::{Path, PathBuf};

use studytrack_core::{ProgressStore, Snapshot};
use tokio::fs;
use tracing::warn;

use super::{Result, Storage};

/// File name of the snapshot slot under the data root.
pub const SNAPSHOT_FILE: &str = "progress.json";

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage rooted at the given directory, creating it if
    /// needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    fn snapshot_path(&self) -> PathBuf {
        self.root.join(SNAPSHOT_FILE)
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn save(&mut self, state: &ProgressStore) -> Result<()> {
        let snapshot = Snapshot::from(state);
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(self.snapshot_path(), json.as_bytes()).await?;
        Ok(())
    }

    async fn load(&self) -> Result<ProgressStore> {
        match fs::read_to_string(self.snapshot_path()).await {
            Ok(json) => match serde_json::from_str::<Snapshot>(&json) {
                Ok(snapshot) => Ok(snapshot.into()),
                Err(e) => {
                    // Malformed snapshots must never crash the caller;
                    // fall back to a fresh state.
                    warn!("discarding malformed snapshot: {}", e);
                    Ok(ProgressStore::default())
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ProgressStore::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn clear(&mut self) -> Result<()> {
        fs::remove_file(self.snapshot_path()).await.or_else(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Ok(())
            } else {
                Err(e)
            }
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use studytrack_core::LessonId;

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        let now = Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap();
        let mut store = ProgressStore::new();
        store.sync_checked([LessonId::new("l1"), LessonId::new("l3")], now);

        storage.save(&store).await.unwrap();
        let loaded = storage.load().await.unwrap();
        assert_eq!(loaded, store);
    }

    #[tokio::test]
    async fn test_load_missing_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path()).await.unwrap();

        let loaded = storage.load().await.unwrap();
        assert_eq!(loaded, ProgressStore::default());
    }

    #[tokio::test]
    async fn test_load_malformed_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path()).await.unwrap();
        tokio::fs::write(dir.path().join(SNAPSHOT_FILE), b"{not json")
            .await
            .unwrap();

        let loaded = storage.load().await.unwrap();
        assert_eq!(loaded, ProgressStore::default());
    }

    #[tokio::test]
    async fn test_clear_removes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        let now = Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap();
        let mut store = ProgressStore::new();
        store.sync_checked([LessonId::new("l1")], now);
        storage.save(&store).await.unwrap();
        assert!(dir.path().join(SNAPSHOT_FILE).exists());

        storage.clear().await.unwrap();
        assert!(!dir.path().join(SNAPSHOT_FILE).exists());
        assert_eq!(storage.load().await.unwrap(), ProgressStore::default());

        // Clearing an already-empty slot is fine.
        storage.clear().await.unwrap();
    }
}
