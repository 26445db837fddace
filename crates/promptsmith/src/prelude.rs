//! Convenience re-exports for common `promptsmith` types.
//!
//! ```
//! use promptsmith::prelude::*;
//! ```

// ── Options and assembly ────────────────────────────────────────────
pub use crate::assembler::assemble;
pub use crate::options::{InputError, Persona, PromptOptions, TaskType, Tone};

// ── History ─────────────────────────────────────────────────────────
pub use crate::history::{
    FileStore, HistoryCache, HistoryEntry, HistoryStore, KeyValueStore, MemoryStore,
};

// ── Generation ──────────────────────────────────────────────────────
pub use crate::generation::{
    FnService, GeminiClient, GenerationError, GenerationErrorKind, GenerationService,
};

// ── Session and config ──────────────────────────────────────────────
pub use crate::config::{Config, ConfigError};
pub use crate::session::{PromptSession, SessionError};
