use async_trait::async_trait;
use quiz_core::model::{QuizStatsSnapshot, STATS_SNAPSHOT_KEY};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Encode a snapshot into the JSON value stored under [`STATS_SNAPSHOT_KEY`].
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the snapshot cannot be encoded.
pub fn encode_snapshot(snapshot: &QuizStatsSnapshot) -> Result<String, StorageError> {
    serde_json::to_string(snapshot).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Decode a stored JSON value, validating the snapshot invariants.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON or a record whose
/// counters disagree with its id sets.
pub fn decode_snapshot(raw: &str) -> Result<QuizStatsSnapshot, StorageError> {
    serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Local cache for the realtime stats snapshot.
///
/// The cached copy only seeds the display across reloads; the in-memory
/// tracker stays authoritative.
#[async_trait]
pub trait StatsSnapshotRepository: Send + Sync {
    /// Fetch the last saved snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store is unreachable or the stored value
    /// is not a valid snapshot.
    async fn load_snapshot(&self) -> Result<Option<QuizStatsSnapshot>, StorageError>;

    /// Overwrite the saved snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be encoded or stored.
    async fn save_snapshot(&self, snapshot: &QuizStatsSnapshot) -> Result<(), StorageError>;
}

/// Key-value store held in memory, for tests and offline runs.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value for `key`, as it would sit in the browser-style cache.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn raw_entry(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    /// Store a raw value for `key` without validation.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn put_raw_entry(&self, key: &str, value: impl Into<String>) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.into());
        Ok(())
    }
}

#[async_trait]
impl StatsSnapshotRepository for InMemoryRepository {
    async fn load_snapshot(&self) -> Result<Option<QuizStatsSnapshot>, StorageError> {
        self.raw_entry(STATS_SNAPSHOT_KEY)?
            .as_deref()
            .map(decode_snapshot)
            .transpose()
    }

    async fn save_snapshot(&self, snapshot: &QuizStatsSnapshot) -> Result<(), StorageError> {
        let encoded = encode_snapshot(snapshot)?;
        self.put_raw_entry(STATS_SNAPSHOT_KEY, encoded)
    }
}

/// Repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub stats: Arc<dyn StatsSnapshotRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let stats: Arc<dyn StatsSnapshotRepository> = Arc::new(InMemoryRepository::new());
        Self { stats }
    }
}
