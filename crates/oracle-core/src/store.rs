//! History and Counter Store
//!
//! Capped in-memory prediction history and the persisted shake counter.
//! Persistence goes through the narrow [`KeyValueStore`] interface so the
//! backing mechanism can be swapped without touching the controller.

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{OracleError, Result};
use crate::prediction::PredictionResult;

/// Key the shake counter is persisted under
pub const SHAKE_COUNT_KEY: &str = "solana_ball_shakes";

/// Maximum number of predictions kept in history
pub const HISTORY_CAPACITY: usize = 10;

/// Key-value store trait for persistence
pub trait KeyValueStore: Send + Sync {
    /// Read a value by key
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value under a key
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory key-value store (for development/testing)
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Key-value store backed by a flat JSON object on disk
///
/// Every write rewrites the whole file; the store holds a handful of keys.
pub struct JsonFileStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.read().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.write().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_all().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), "Replacing unreadable store file: {}", e);
            HashMap::new()
        });
        entries.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.path, raw)
            .map_err(|e| OracleError::Storage(format!("{}: {}", self.path.display(), e)))
    }
}

/// Monotonic shake counter with best-effort persistence
pub struct ShakeCounter {
    count: u64,
    store: Arc<dyn KeyValueStore>,
}

impl ShakeCounter {
    /// Restore the counter; missing, unreadable or unparsable values start at 0
    pub fn restore(store: Arc<dyn KeyValueStore>) -> Self {
        let count = match store.get(SHAKE_COUNT_KEY) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Unparsable shake counter, starting from 0");
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                tracing::warn!("Failed to read shake counter: {}", e);
                0
            }
        };

        Self { count, store }
    }

    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Increment in memory; the returned write must be persisted separately
    pub fn record_visit(&mut self) -> PendingCount {
        self.count = self.count.saturating_add(1);
        PendingCount {
            count: self.count,
            store: Arc::clone(&self.store),
        }
    }
}

/// A counter value not yet written to its store
///
/// Split from [`ShakeCounter::record_visit`] so the write (possibly file I/O)
/// happens outside the state lock.
#[must_use = "the count is only persisted by `persist`"]
pub struct PendingCount {
    count: u64,
    store: Arc<dyn KeyValueStore>,
}

impl PendingCount {
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Blocking write; failures are logged only
    pub fn persist(self) {
        if let Err(e) = self.store.set(SHAKE_COUNT_KEY, &self.count.to_string()) {
            tracing::warn!(count = self.count, "Failed to persist shake counter: {}", e);
        }
    }
}

impl std::fmt::Debug for ShakeCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShakeCounter").field("count", &self.count).finish_non_exhaustive()
    }
}

/// Most-recent-first prediction history
#[derive(Clone, Debug)]
pub struct History {
    entries: VecDeque<PredictionResult>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend, evicting the oldest entry on overflow
    pub fn append(&mut self, result: PredictionResult) {
        self.entries.push_front(result);
        self.entries.truncate(self.capacity);
    }

    pub fn latest(&self) -> Option<&PredictionResult> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PredictionResult> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<PredictionResult> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
