//! In-memory history value: [`HistoryEntry`] and the bounded
//! [`HistoryStore`] sequence.
//!
//! Invariants held after every mutation:
//! - at most [`HISTORY_CAPACITY`] entries,
//! - no two entries share an `idea` (exact, case-sensitive),
//! - newest insertion first.

use crate::options::PromptOptions;
use serde::{Deserialize, Serialize};

/// Maximum number of entries kept.
pub const HISTORY_CAPACITY: usize = 5;

/// One past generation: the options that produced it and the result.
///
/// Serialized flat, matching the browser app's `localStorage` layout:
/// `{ id, timestamp, idea, persona, tone, taskType, generatedPrompt }`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    /// Creation time, Unix milliseconds.
    pub timestamp: i64,
    #[serde(flatten)]
    pub options: PromptOptions,
    pub generated_prompt: String,
}

impl HistoryEntry {
    pub fn idea(&self) -> &str {
        &self.options.idea
    }

    /// Creation time as a UTC datetime, if the timestamp is in range.
    pub fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Newest-first, capacity-bounded, idea-deduplicated list of entries.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from entries in newest-first order, enforcing the
    /// invariants: later duplicates of an idea are dropped, then the list is
    /// truncated to capacity.
    pub fn from_entries(entries: impl IntoIterator<Item = HistoryEntry>) -> Self {
        let mut kept: Vec<HistoryEntry> = Vec::new();
        for entry in entries {
            if !kept.iter().any(|k| k.idea() == entry.idea()) {
                kept.push(entry);
            }
        }
        kept.truncate(HISTORY_CAPACITY);
        Self { entries: kept }
    }

    /// Upsert by idea: drop any entry with the same idea, put `entry` first,
    /// evict the oldest beyond capacity.
    pub fn insert(&mut self, entry: HistoryEntry) {
        self.entries.retain(|e| e.idea() != entry.idea());
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry.
    pub fn newest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Find an entry by full id or by an unambiguous id prefix.
    pub fn find_by_prefix(&self, prefix: &str) -> Option<&HistoryEntry> {
        if prefix.is_empty() {
            return None;
        }
        if let Some(exact) = self.get(prefix) {
            return Some(exact);
        }
        let mut matches = self.entries.iter().filter(|e| e.id.starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    pub fn into_entries(self) -> Vec<HistoryEntry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a HistoryStore {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Persona, TaskType, Tone};

    fn entry(id: &str, idea: &str, prompt: &str) -> HistoryEntry {
        HistoryEntry {
            id: id.into(),
            timestamp: 1_700_000_000_000,
            options: PromptOptions::new(
                idea,
                Persona::SoftwareEngineer,
                Tone::Professional,
                TaskType::CodeGeneration,
            ),
            generated_prompt: prompt.into(),
        }
    }

    fn ideas(store: &HistoryStore) -> Vec<&str> {
        store.iter().map(HistoryEntry::idea).collect()
    }

    #[test]
    fn insert_prepends() {
        let mut store = HistoryStore::new();
        store.insert(entry("1", "A", "P1"));
        store.insert(entry("2", "B", "P2"));
        assert_eq!(ideas(&store), ["B", "A"]);
        assert_eq!(store.newest().unwrap().id, "2");
    }

    #[test]
    fn insert_duplicate_idea_moves_to_front() {
        let mut store = HistoryStore::new();
        store.insert(entry("1", "A", "P1"));
        store.insert(entry("2", "B", "P2"));
        store.insert(entry("3", "A", "P3"));
        assert_eq!(ideas(&store), ["A", "B"]);
        assert_eq!(store.entries()[0].generated_prompt, "P3");
        assert!(store.get("1").is_none());
    }

    #[test]
    fn dedup_is_case_and_whitespace_sensitive() {
        let mut store = HistoryStore::new();
        store.insert(entry("1", "idea", "P"));
        store.insert(entry("2", "Idea", "P"));
        store.insert(entry("3", "idea ", "P"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut store = HistoryStore::new();
        for i in 1..=6 {
            store.insert(entry(&i.to_string(), &i.to_string(), "P"));
        }
        assert_eq!(ideas(&store), ["6", "5", "4", "3", "2"]);
    }

    #[test]
    fn from_entries_enforces_invariants() {
        let raw = vec![
            entry("a", "x", "newest x"),
            entry("b", "y", "P"),
            entry("c", "x", "older x"),
            entry("d", "1", "P"),
            entry("e", "2", "P"),
            entry("f", "3", "P"),
            entry("g", "4", "P"),
        ];
        let store = HistoryStore::from_entries(raw);
        assert_eq!(store.len(), HISTORY_CAPACITY);
        assert_eq!(ideas(&store), ["x", "y", "1", "2", "3"]);
        assert_eq!(store.entries()[0].generated_prompt, "newest x");
    }

    #[test]
    fn find_by_prefix_requires_unique_match() {
        let store = HistoryStore::from_entries([
            entry("abc-1", "A", "P"),
            entry("abd-2", "B", "P"),
        ]);
        assert_eq!(store.find_by_prefix("abc").unwrap().idea(), "A");
        assert!(store.find_by_prefix("ab").is_none());
        assert!(store.find_by_prefix("").is_none());
        assert_eq!(store.find_by_prefix("abd-2").unwrap().idea(), "B");
    }

    #[test]
    fn entry_serializes_flat_camel_case() {
        let json = serde_json::to_value(entry("id-1", "A", "P1")).unwrap();
        assert_eq!(json["id"], "id-1");
        assert_eq!(json["idea"], "A");
        assert_eq!(json["taskType"], "Code Generation");
        assert_eq!(json["generatedPrompt"], "P1");
        assert!(json.get("options").is_none());
    }

    #[test]
    fn store_serializes_as_array() {
        let store = HistoryStore::from_entries([entry("1", "A", "P")]);
        let json = serde_json::to_value(&store).unwrap();
        assert!(json.is_array());
        let back: HistoryStore = serde_json::from_value(json).unwrap();
        assert_eq!(back, store);
    }

    #[test]
    fn created_at_converts_millis() {
        let e = entry("1", "A", "P");
        assert_eq!(e.created_at().unwrap().timestamp_millis(), e.timestamp);
    }
}
