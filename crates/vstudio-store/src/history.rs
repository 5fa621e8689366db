//! Write-through generation history.

use std::path::{Path, PathBuf};

use tokio::sync::RwLock;
use tracing::{debug, warn};

use vstudio_models::GeneratedVideoRecord;

use crate::error::StoreResult;

/// Fixed file name the history is persisted under.
pub const HISTORY_FILE_NAME: &str = "veo_history.json";

/// Ordered collection of generated-video records, most recent first.
///
/// The store is the single owner of the persisted sequence: every
/// mutation rewrites the file before it becomes visible in memory, so the
/// file is always the exact serialization of the in-memory state.
pub struct HistoryStore {
    path: PathBuf,
    records: RwLock<Vec<GeneratedVideoRecord>>,
}

impl HistoryStore {
    /// Load the history from `dir` at session start.
    ///
    /// Missing, unreadable, or malformed data yields an empty history; a
    /// corrupt file must never block the application from starting.
    pub async fn load(dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join(HISTORY_FILE_NAME);
        let records = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Vec<GeneratedVideoRecord>>(&bytes) {
                Ok(records) => {
                    debug!(path = %path.display(), count = records.len(), "Loaded history");
                    records
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Corrupt history file, starting empty");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No history file yet");
                Vec::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read history, starting empty");
                Vec::new()
            }
        };

        Self {
            path,
            records: RwLock::new(records),
        }
    }

    /// Insert a record at the head and persist the full updated sequence.
    ///
    /// The new sequence is written to disk first and only becomes the
    /// in-memory view once the write succeeded, so a failed append leaves
    /// both views on the previous snapshot.
    pub async fn append(&self, record: GeneratedVideoRecord) -> StoreResult<()> {
        let mut records = self.records.write().await;

        let mut updated = Vec::with_capacity(records.len() + 1);
        updated.push(record);
        updated.extend(records.iter().cloned());

        self.persist(&updated).await?;
        *records = updated;
        Ok(())
    }

    /// Snapshot of the current in-memory sequence.
    pub async fn all(&self) -> Vec<GeneratedVideoRecord> {
        self.records.read().await.clone()
    }

    /// Number of records in the history.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the sequence and replace the backing file atomically.
    async fn persist(&self, records: &[GeneratedVideoRecord]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let payload = serde_json::to_vec_pretty(records)?;

        // Temp file + rename so a crash mid-write cannot corrupt the
        // previous snapshot.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &payload).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), count = records.len(), "Persisted history");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vstudio_models::{AspectRatio, GenerationType, Resolution};

    fn record(prompt: &str) -> GeneratedVideoRecord {
        GeneratedVideoRecord::new(
            "https://x/y",
            prompt,
            "anime",
            GenerationType::TextToVideo,
            AspectRatio::default(),
            Resolution::default(),
        )
    }

    #[tokio::test]
    async fn test_append_then_reload_is_most_recent_first() {
        let dir = tempfile::tempdir().unwrap();

        let store = HistoryStore::load(dir.path()).await;
        store.append(record("first")).await.unwrap();
        store.append(record("second")).await.unwrap();

        // Simulate a new session.
        let reloaded = HistoryStore::load(dir.path()).await;
        let records = reloaded.all().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].prompt, "second");
        assert_eq!(records[1].prompt, "first");
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(HISTORY_FILE_NAME);
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let store = HistoryStore::load(dir.path()).await;
        assert!(store.is_empty().await);

        // The store still accepts appends afterwards.
        store.append(record("fresh")).await.unwrap();
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_missing_directory_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("does-not-exist-yet");

        let store = HistoryStore::load(&nested).await;
        assert!(store.is_empty().await);

        // Appending creates the directory on demand.
        store.append(record("first")).await.unwrap();
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn test_write_through_keeps_file_in_sync() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::load(dir.path()).await;

        for prompt in ["a", "b", "c"] {
            store.append(record(prompt)).await.unwrap();

            let bytes = tokio::fs::read(store.path()).await.unwrap();
            let on_disk: Vec<GeneratedVideoRecord> = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(on_disk, store.all().await);
        }
    }
}
