//! HTTP client for the Gemini `generateContent` endpoint.

use super::classify::{classify_failure, classify_transport};
use super::{GenerationError, GenerationErrorKind, GenerationFuture, GenerationService};
use crate::config::{Config, ConfigError};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, error, trace};

// ── Request types ──────────────────────────────────────────────────

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize, Debug)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize, Debug)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
}

// ── Response types ─────────────────────────────────────────────────

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct RawGenerateResponse {
    #[serde(default)]
    candidates: Vec<RawCandidate>,
    error: Option<ApiError>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawCandidate {
    content: Option<RawContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawContent {
    #[serde(default)]
    parts: Vec<RawPart>,
}

#[derive(Deserialize, Debug)]
struct RawPart {
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

/// Structured error body: `{"error": {"code", "message", "status", "details"}}`.
#[derive(Deserialize, Debug)]
struct ApiError {
    #[serde(default)]
    message: String,
    status: Option<String>,
    #[serde(default)]
    details: Vec<ApiErrorDetail>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorDetail {
    reason: Option<String>,
}

impl ApiError {
    fn reasons(&self) -> Vec<&str> {
        self.details
            .iter()
            .filter_map(|d| d.reason.as_deref())
            .collect()
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// Async client for Gemini text generation.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    temperature: f32,
    top_p: f32,
}

impl GeminiClient {
    /// Create a client with default settings and the given key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        Self::from_config(&Config::default().with_api_key(api_key))
    }

    /// Create a client from a [`Config`]. Fails if no API key is set.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let api_key = config.require_api_key()?.to_string();
        let client = reqwest::Client::builder()
            .user_agent(concat!("promptsmith/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(ConfigError::HttpClient)?;
        Ok(Self {
            client,
            api_key,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    /// Send one prompt and return the generated text.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                top_p: self.top_p,
            },
        };
        debug!(
            "Generation request: model={}, prompt={} chars, temp={}, top_p={}",
            self.model,
            prompt.len(),
            self.temperature,
            self.top_p,
        );
        trace!(
            "Request payload size: {} bytes",
            serde_json::to_string(&body).map_or(0, |s| s.len())
        );

        let start = Instant::now();

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let kind = classify_transport(&e);
                error!("Generation request failed ({kind}): {e}");
                GenerationError::new(kind, format!("request failed: {e}"))
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            let kind = classify_transport(&e);
            GenerationError::new(kind, format!("failed to read response: {e}"))
        })?;

        debug!(
            "Generation response: HTTP {} in {:.1}s ({} bytes)",
            status,
            start.elapsed().as_secs_f64(),
            text.len()
        );

        // Error bodies are best-effort: a proxy may answer with HTML.
        let parsed = serde_json::from_str::<RawGenerateResponse>(&text);

        if !status.is_success() {
            let api_error = parsed.ok().and_then(|p| p.error);
            return Err(failure(status.as_u16(), api_error.as_ref(), &text));
        }

        let parsed = parsed.map_err(|e| {
            error!("Unparseable generation response: {e}");
            GenerationError::new(
                GenerationErrorKind::Unknown,
                format!("failed to parse response: {e}"),
            )
        })?;

        if let Some(api_error) = parsed.error.as_ref() {
            return Err(failure(status.as_u16(), Some(api_error), &text));
        }

        if let Some(usage) = parsed.usage_metadata.as_ref() {
            debug!(
                "Token usage: prompt={}, output={}",
                usage.prompt_token_count.unwrap_or(0),
                usage.candidates_token_count.unwrap_or(0),
            );
        }

        let candidate = parsed.candidates.into_iter().next();
        let finish_reason = candidate.as_ref().and_then(|c| c.finish_reason.clone());
        let output: String = candidate
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect()
            })
            .unwrap_or_default();

        if output.trim().is_empty() {
            error!("Generation returned no text (finish_reason={finish_reason:?})");
            return Err(GenerationError::new(
                GenerationErrorKind::Unknown,
                format!("empty response (finish_reason={finish_reason:?})"),
            ));
        }

        debug!("Generation output: {} chars", output.len());
        Ok(output)
    }
}

fn failure(http_status: u16, api_error: Option<&ApiError>, body: &str) -> GenerationError {
    let reasons = api_error.map(ApiError::reasons).unwrap_or_default();
    let kind = classify_failure(
        http_status,
        api_error.and_then(|e| e.status.as_deref()),
        &reasons,
    );
    let detail = match api_error {
        Some(e) => format!("HTTP {http_status}: {}", e.message),
        None => format!("HTTP {http_status}: {body}"),
    };
    error!("Generation failed ({kind}): {detail}");
    GenerationError::new(kind, detail)
}

impl GenerationService for GeminiClient {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerationFuture<'a> {
        Box::pin(self.generate_text(prompt))
    }
}
