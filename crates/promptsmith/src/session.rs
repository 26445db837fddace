//! A prompt-generation session: validation, assembly, generation and
//! history recording in one place.
//!
//! [`PromptSession`] owns the [`HistoryCache`], the current [`HistoryStore`]
//! and the [`GenerationService`]. [`PromptSession::generate`] takes
//! `&mut self`, so history updates from one session are serialized by the
//! borrow checker; shared owners wrap the session in a mutex.

use crate::assembler::assemble;
use crate::generation::{GenerationError, GenerationService};
use crate::history::{HistoryCache, HistoryEntry, HistoryStore, KeyValueStore, new_entry};
use crate::options::{InputError, PromptOptions};
use tracing::{debug, error};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

pub struct PromptSession<S, G> {
    cache: HistoryCache<S>,
    history: HistoryStore,
    service: G,
}

impl<S: KeyValueStore, G: GenerationService> PromptSession<S, G> {
    /// Open a session, loading any persisted history from `substrate`.
    pub fn open(substrate: S, service: G) -> Self {
        let cache = HistoryCache::new(substrate);
        let history = cache.load();
        debug!(entries = history.len(), "Session opened");
        Self {
            cache,
            history,
            service,
        }
    }

    /// Current history, newest first.
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Re-read the persisted history, discarding the in-memory copy.
    pub fn reload(&mut self) -> &HistoryStore {
        self.history = self.cache.load();
        &self.history
    }

    /// Look up a history entry by id or unique id prefix.
    pub fn find(&self, id: &str) -> Option<&HistoryEntry> {
        self.history.find_by_prefix(id)
    }

    /// Validate and assemble without calling the generation service.
    pub fn assemble(&self, options: &PromptOptions) -> Result<String, InputError> {
        options.validate()?;
        Ok(assemble(options))
    }

    /// Validate, assemble, generate, then record the result.
    ///
    /// Returns the recorded entry. Nothing is recorded when validation or
    /// generation fails.
    pub async fn generate(&mut self, options: &PromptOptions) -> Result<HistoryEntry, SessionError> {
        let meta_prompt = self.assemble(options)?;
        debug!(
            "Assembled meta-prompt: {} chars for task '{}'",
            meta_prompt.len(),
            options.task_type
        );

        let generated = self.service.generate(&meta_prompt).await.map_err(|e| {
            error!(kind = %e.kind, "Generation failed: {}", e.detail);
            e
        })?;

        let entry = new_entry(&self.history, options, &generated);
        self.history = self.cache.record_entry(&self.history, entry.clone());
        Ok(entry)
    }
}
