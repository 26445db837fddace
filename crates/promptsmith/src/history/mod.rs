//! Bounded, deduplicating history of generated prompts.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`store`] | [`HistoryEntry`], [`HistoryStore`]: the in-memory value and its invariants |
//! | [`cache`] | [`HistoryCache`]: `load` / `record` over a substrate |
//! | [`substrate`] | [`KeyValueStore`] trait, [`FileStore`], [`MemoryStore`] |

pub mod cache;
pub mod store;
pub mod substrate;

pub use cache::{HISTORY_KEY, HistoryCache, new_entry};
pub use store::{HISTORY_CAPACITY, HistoryEntry, HistoryStore};
pub use substrate::{FileStore, KeyValueStore, MemoryStore, StoreError};
