//! Turn a one-line idea into a detailed, structured prompt for a large
//! language model.
//!
//! `promptsmith` combines an idea with a persona, a tone and a task type into
//! a *meta-prompt*: instructions asking a model to write the real prompt. The
//! meta-prompt is sent to a generation service (Gemini by default), and the
//! result is kept in a small history: at most five entries, newest first,
//! one per distinct idea.
//!
//! # Getting started
//!
//! ```no_run
//! use promptsmith::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env();
//! let client = GeminiClient::from_config(&config)?;
//! let mut session = PromptSession::open(FileStore::new(&config.data_dir), client);
//!
//! let options = PromptOptions::new(
//!     "a CSV parser",
//!     Persona::SoftwareEngineer,
//!     Tone::Technical,
//!     TaskType::CodeGeneration,
//! );
//! let entry = session.generate(&options).await?;
//! println!("{}", entry.generated_prompt);
//! # Ok(())
//! # }
//! ```
//!
//! Assembly alone needs no network:
//!
//! ```
//! use promptsmith::prelude::*;
//!
//! let options = PromptOptions::new(
//!     "a CSV parser",
//!     Persona::SoftwareEngineer,
//!     Tone::Technical,
//!     TaskType::CodeGeneration,
//! );
//! let meta = assemble(&options);
//! assert!(meta.contains("a CSV parser"));
//! assert!(meta.contains("Output Format Requirements"));
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`options`] | [`Persona`](options::Persona), [`Tone`](options::Tone), [`TaskType`](options::TaskType), [`PromptOptions`](options::PromptOptions) |
//! | [`assembler`] | [`assemble`](assembler::assemble), the meta-prompt builder and per-task format profiles |
//! | [`history`] | Bounded, deduplicating history over a key-value substrate |
//! | [`generation`] | [`GenerationService`](generation::GenerationService) trait, Gemini client, error classification |
//! | [`templates`] | Built-in prompt templates and quick-start examples |
//! | [`session`] | [`PromptSession`](session::PromptSession): validate, assemble, generate, record |
//! | [`config`] | Defaults and environment overrides |

pub mod assembler;
pub mod config;
pub mod generation;
pub mod history;
pub mod options;
pub mod prelude;
pub mod session;
pub mod templates;
