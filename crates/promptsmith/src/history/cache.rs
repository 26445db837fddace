//! Persistent history cache over a [`KeyValueStore`].
//!
//! The whole history lives as one JSON array under [`HISTORY_KEY`]. The cache
//! holds no state of its own: [`HistoryCache::load`] always re-reads the
//! substrate and [`HistoryCache::record`] takes the caller's current
//! [`HistoryStore`] and returns the next one.
//!
//! Persistence failures never reach the caller. A missing, unreadable or
//! malformed value loads as an empty history; a failed write is logged and
//! the freshly computed history is returned anyway.

use super::store::{HistoryEntry, HistoryStore};
use super::substrate::KeyValueStore;
use crate::options::PromptOptions;
use tracing::{debug, info, warn};

/// Substrate key holding the serialized history.
pub const HISTORY_KEY: &str = "promptGeneratorHistory";

pub struct HistoryCache<S> {
    substrate: S,
}

impl<S: KeyValueStore> HistoryCache<S> {
    pub fn new(substrate: S) -> Self {
        Self { substrate }
    }

    pub fn substrate(&self) -> &S {
        &self.substrate
    }

    /// Read the persisted history.
    ///
    /// Entries are normalized on the way in (duplicates of an idea after its
    /// first occurrence dropped, list truncated to capacity), so a hand-edited
    /// file cannot break the invariants.
    pub fn load(&self) -> HistoryStore {
        let raw = match self.substrate.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return HistoryStore::new(),
            Err(e) => {
                warn!("Failed to read history: {e}");
                return HistoryStore::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
            Ok(entries) => {
                let store = HistoryStore::from_entries(entries);
                debug!(entries = store.len(), "Loaded history");
                store
            }
            Err(e) => {
                warn!("Ignoring malformed history: {e}");
                HistoryStore::new()
            }
        }
    }

    /// Record a generation and persist the resulting history.
    ///
    /// The previous history is not modified; the next one is returned. A
    /// failed write is logged and the freshly computed history returned
    /// anyway.
    pub fn record(
        &self,
        current: &HistoryStore,
        options: &PromptOptions,
        generated_prompt: &str,
    ) -> HistoryStore {
        let entry = new_entry(current, options, generated_prompt);
        self.record_entry(current, entry)
    }

    /// Insert a prepared entry and persist the result.
    pub fn record_entry(&self, current: &HistoryStore, entry: HistoryEntry) -> HistoryStore {
        info!(id = %entry.id, task = %entry.options.task_type, "Recorded history entry");
        let mut next = current.clone();
        next.insert(entry);
        self.persist(&next);
        next
    }

    fn persist(&self, store: &HistoryStore) {
        let json = match serde_json::to_string(store) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize history: {e}");
                return;
            }
        };
        if let Err(e) = self.substrate.set(HISTORY_KEY, &json) {
            warn!("Failed to save history: {e}");
        }
    }
}

/// Build the entry `record` would insert: a fresh UUID and the current time.
///
/// The timestamp is kept strictly greater than the current newest entry's,
/// so ordering by timestamp agrees with list order even if the clock steps
/// backwards. At `i64::MAX` the timestamp saturates and ties the newest.
pub fn new_entry(
    current: &HistoryStore,
    options: &PromptOptions,
    generated_prompt: &str,
) -> HistoryEntry {
    let now = chrono::Utc::now().timestamp_millis();
    let timestamp = match current.newest() {
        Some(newest) if newest.timestamp >= now => newest.timestamp.saturating_add(1),
        _ => now,
    };
    HistoryEntry {
        id: uuid::Uuid::new_v4().to_string(),
        timestamp,
        options: options.clone(),
        generated_prompt: generated_prompt.to_string(),
    }
}
