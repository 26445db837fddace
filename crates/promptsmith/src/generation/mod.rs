//! The generation service: sends a meta-prompt to a language model and
//! returns the text it produced, or a classified error.
//!
//! [`GenerationService`] is the seam. [`GeminiClient`](gemini::GeminiClient)
//! is the production implementation; [`FnService`] wraps a closure for tests
//! and offline use.

pub mod classify;
pub mod gemini;

pub use classify::{
    classify_api_status, classify_failure, classify_reason, classify_status, classify_transport,
};
pub use gemini::GeminiClient;

use futures::future::BoxFuture;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

// ── Errors ─────────────────────────────────────────────────────────

/// Why a generation failed. Decided by the service from typed data (HTTP
/// status, structured API error, transport error category), never from
/// free-form message text.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationErrorKind {
    InvalidCredentials,
    RateLimited,
    ServiceUnavailable,
    NetworkUnreachable,
    Unknown,
}

impl GenerationErrorKind {
    /// Fixed message suitable for showing to an end user.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::InvalidCredentials => {
                "Invalid API Key. Please ensure your API key is correctly configured and has the necessary permissions."
            }
            Self::RateLimited => {
                "Rate limit exceeded. You have made too many requests in a short period. Please wait a moment and try again."
            }
            Self::ServiceUnavailable => {
                "The AI service is currently experiencing issues on its end. Please try again in a few minutes."
            }
            Self::NetworkUnreachable => {
                "Could not connect to the AI service. Please check your network connection and try again."
            }
            Self::Unknown => "An unknown error occurred. Please try again later.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid-credentials",
            Self::RateLimited => "rate-limited",
            Self::ServiceUnavailable => "service-unavailable",
            Self::NetworkUnreachable => "network-unreachable",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for GenerationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed generation. `detail` carries diagnostic text for logs; only
/// [`GenerationErrorKind::user_message`] is meant for end users.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .kind.user_message())]
pub struct GenerationError {
    pub kind: GenerationErrorKind,
    pub detail: String,
}

impl GenerationError {
    pub fn new(kind: GenerationErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn user_message(&self) -> &'static str {
        self.kind.user_message()
    }
}

// ── Service trait ──────────────────────────────────────────────────

/// Future returned by [`GenerationService::generate`].
pub type GenerationFuture<'a> = BoxFuture<'a, Result<String, GenerationError>>;

/// Anything that turns a meta-prompt into generated text.
///
/// Implementations are not expected to retry.
pub trait GenerationService: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerationFuture<'a>;
}

impl<T: GenerationService + ?Sized> GenerationService for Arc<T> {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerationFuture<'a> {
        (**self).generate(prompt)
    }
}

impl<T: GenerationService + ?Sized> GenerationService for Box<T> {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerationFuture<'a> {
        (**self).generate(prompt)
    }
}

// ── FnService ──────────────────────────────────────────────────────

type ErasedHandler = Box<dyn Fn(String) -> GenerationFuture<'static> + Send + Sync>;

/// A closure-based generation service.
///
/// ```
/// use promptsmith::generation::{FnService, GenerationService};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let echo = FnService::new(|prompt: String| async move { Ok(format!("echo: {prompt}")) });
/// assert_eq!(echo.generate("hi").await.unwrap(), "echo: hi");
/// # }
/// ```
pub struct FnService {
    handler: ErasedHandler,
}

impl FnService {
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, GenerationError>> + Send + 'static,
    {
        Self {
            handler: Box::new(move |prompt: String| -> GenerationFuture<'static> {
                Box::pin(handler(prompt))
            }),
        }
    }

    /// A service that always fails with `kind`.
    pub fn failing(kind: GenerationErrorKind) -> Self {
        Self::new(move |_| async move { Err(GenerationError::new(kind, "stubbed failure")) })
    }
}

impl GenerationService for FnService {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerationFuture<'a> {
        (self.handler)(prompt.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_distinct_message() {
        let kinds = [
            GenerationErrorKind::InvalidCredentials,
            GenerationErrorKind::RateLimited,
            GenerationErrorKind::ServiceUnavailable,
            GenerationErrorKind::NetworkUnreachable,
            GenerationErrorKind::Unknown,
        ];
        let messages: std::collections::HashSet<_> =
            kinds.iter().map(|k| k.user_message()).collect();
        assert_eq!(messages.len(), kinds.len());
    }

    #[test]
    fn error_displays_user_message_only() {
        let err = GenerationError::new(GenerationErrorKind::RateLimited, "HTTP 429: quota");
        assert!(err.to_string().starts_with("Rate limit exceeded."));
        assert!(!err.to_string().contains("429"));
    }

    #[test]
    fn kind_serializes_kebab_case() {
        let json = serde_json::to_value(GenerationErrorKind::NetworkUnreachable).unwrap();
        assert_eq!(json, "network-unreachable");
        assert_eq!(GenerationErrorKind::InvalidCredentials.to_string(), "invalid-credentials");
    }

    #[tokio::test]
    async fn fn_service_passes_prompt_through() {
        let svc = FnService::new(|p: String| async move { Ok(p.to_uppercase()) });
        assert_eq!(svc.generate("abc").await.unwrap(), "ABC");
    }

    #[tokio::test]
    async fn failing_service_reports_kind() {
        let svc: Arc<dyn GenerationService> =
            Arc::new(FnService::failing(GenerationErrorKind::ServiceUnavailable));
        let err = svc.generate("x").await.unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::ServiceUnavailable);
    }
}
