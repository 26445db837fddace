//! Browser-facing JSON API for promptsmith.
//!
//! `promptsmith-web` serves the prompt generator over HTTP: the option
//! catalogues, templates and examples for populating a form, the history,
//! and endpoints that assemble or generate a prompt. An optional static
//! directory serves a front-end bundle from the same origin.
//!
//! # Quick start
//!
//! ```ignore
//! use promptsmith::prelude::*;
//! use promptsmith_web::{WebConfig, shared_session, spawn_web};
//!
//! let config = Config::from_env();
//! let session = shared_session(
//!     FileStore::new(&config.data_dir),
//!     GeminiClient::from_config(&config)?,
//! );
//! let addr = spawn_web(session, WebConfig::default()).await?;
//! println!("API: http://{addr}/api/options");
//! ```
//!
//! # Endpoints
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | GET | `/api/options` | | personas, tones, task types, form defaults |
//! | GET | `/api/templates` | | templates grouped by category |
//! | GET | `/api/examples` | | quick-start examples |
//! | GET | `/api/history` | | history entries, newest first |
//! | GET | `/api/history/{id}` | | one entry (id or unique prefix), or 404 |
//! | POST | `/api/assemble` | options | `{ "metaPrompt": ... }` |
//! | POST | `/api/generate` | options | the recorded history entry |
//!
//! Only `/api/generate` waits for other generate requests; every other
//! endpoint answers while a generation is in flight.
//!
//! Errors are `{ "error": <message>, "kind": <kind> }`. An empty idea is 400
//! with kind `empty-idea`; generation failures are 502 with the generation
//! error kind and its user-facing message.

mod api;
mod server;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use promptsmith::generation::GenerationService;
use promptsmith::history::{HistoryEntry, HistoryStore, KeyValueStore};
use promptsmith::options::PromptOptions;
use promptsmith::session::{PromptSession, SessionError};
use tokio::sync::{Mutex, RwLock};

/// Session type served by the API: type-erased store and service.
pub type DynSession = PromptSession<Arc<dyn KeyValueStore>, Arc<dyn GenerationService>>;

/// The session shared by all handlers.
///
/// Generation runs under a mutex held across the model call, so history
/// updates never interleave. Readers use a snapshot of the history that is
/// replaced after each recorded generation, so they never wait on the model.
#[derive(Clone)]
pub struct SharedSession {
    session: Arc<Mutex<DynSession>>,
    history: Arc<RwLock<HistoryStore>>,
}

impl SharedSession {
    pub fn new(session: DynSession) -> Self {
        let history = session.history().clone();
        Self {
            session: Arc::new(Mutex::new(session)),
            history: Arc::new(RwLock::new(history)),
        }
    }

    /// Current history, newest first.
    pub async fn history(&self) -> HistoryStore {
        self.history.read().await.clone()
    }

    /// Look up a history entry by id or unique id prefix.
    pub async fn find(&self, id: &str) -> Option<HistoryEntry> {
        self.history.read().await.find_by_prefix(id).cloned()
    }

    /// Generate and record, one request at a time.
    pub async fn generate(&self, options: &PromptOptions) -> Result<HistoryEntry, SessionError> {
        let mut session = self.session.lock().await;
        let entry = session.generate(options).await?;
        *self.history.write().await = session.history().clone();
        Ok(entry)
    }
}

/// Open a session over `store` and `service` and wrap it for sharing.
pub fn shared_session(
    store: impl KeyValueStore + 'static,
    service: impl GenerationService + 'static,
) -> SharedSession {
    SharedSession::new(PromptSession::open(
        Arc::new(store) as Arc<dyn KeyValueStore>,
        Arc::new(service) as Arc<dyn GenerationService>,
    ))
}

/// Configuration for the web server.
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:3001`.
    pub bind_addr: SocketAddr,
    /// Directory of static front-end files served for non-API paths.
    ///
    /// If `None`, only the API is served.
    pub static_dir: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
            static_dir: None,
        }
    }
}

/// Spawn the web server on a Tokio task and return the bound address.
///
/// The server runs until the Tokio runtime shuts down.
pub async fn spawn_web(session: SharedSession, config: WebConfig) -> std::io::Result<SocketAddr> {
    let router = server::build_router(session, config.static_dir);
    server::start_server(router, config.bind_addr).await
}
