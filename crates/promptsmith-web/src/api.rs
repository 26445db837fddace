//! REST API endpoint handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use promptsmith::assembler;
use promptsmith::history::{HistoryEntry, HistoryStore};
use promptsmith::options::{InputError, Persona, PromptOptions, TaskType, Tone};
use promptsmith::session::SessionError;
use promptsmith::templates::{self, ExamplePrompt, PromptTemplate, TemplateCategory};
use serde::Serialize;
use tracing::info;

use crate::SharedSession;

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub session: SharedSession,
}

// ── Errors ─────────────────────────────────────────────────────────

/// JSON error response: `{ "error": <message>, "kind": <kind> }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl ApiError {
    fn not_found(what: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            kind: "not-found",
            message: what.into(),
        }
    }
}

impl From<InputError> for ApiError {
    fn from(e: InputError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: "empty-idea",
            message: e.to_string(),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Input(e) => e.into(),
            SessionError::Generation(e) => Self {
                status: StatusCode::BAD_GATEWAY,
                kind: e.kind.as_str(),
                message: e.user_message().to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message, "kind": self.kind });
        (self.status, Json(body)).into_response()
    }
}

// ── Catalogues ─────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    pub personas: Vec<&'static str>,
    pub tones: Vec<&'static str>,
    pub task_types: Vec<String>,
    pub defaults: PromptOptions,
}

/// GET /api/options: Selectable personas, tones and task types.
pub async fn get_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        personas: Persona::ALL.iter().map(|p| p.label()).collect(),
        tones: Tone::ALL.iter().map(|t| t.label()).collect(),
        task_types: TaskType::KNOWN.into_iter().map(String::from).collect(),
        defaults: PromptOptions::default(),
    })
}

#[derive(Serialize)]
pub struct TemplateGroup {
    pub category: TemplateCategory,
    pub templates: Vec<&'static PromptTemplate>,
}

/// GET /api/templates: Templates grouped by category, in category order.
pub async fn get_templates() -> Json<Vec<TemplateGroup>> {
    let groups = templates::grouped()
        .into_iter()
        .map(|(category, templates)| TemplateGroup {
            category,
            templates,
        })
        .collect();
    Json(groups)
}

/// GET /api/examples: Quick-start examples.
pub async fn get_examples() -> Json<&'static [ExamplePrompt]> {
    Json(&templates::EXAMPLE_PROMPTS)
}

// ── History ────────────────────────────────────────────────────────

/// GET /api/history: Entries, newest first.
pub async fn get_history(State(app): State<AppState>) -> Json<HistoryStore> {
    Json(app.session.history().await)
}

/// GET /api/history/{id}: One entry by id or unique id prefix.
pub async fn get_history_entry(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HistoryEntry>, ApiError> {
    app.session
        .find(&id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("no history entry matches '{id}'")))
}

// ── Assemble / generate ────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembleResponse {
    pub meta_prompt: String,
}

/// POST /api/assemble: Build the meta-prompt without calling the model.
pub async fn post_assemble(
    Json(options): Json<PromptOptions>,
) -> Result<Json<AssembleResponse>, ApiError> {
    options.validate()?;
    let meta_prompt = assembler::assemble(&options);
    Ok(Json(AssembleResponse { meta_prompt }))
}

/// POST /api/generate: Generate a prompt and record it in history.
///
/// Concurrent requests are recorded one after another.
pub async fn post_generate(
    State(app): State<AppState>,
    Json(options): Json<PromptOptions>,
) -> Result<Json<HistoryEntry>, ApiError> {
    let entry = app.session.generate(&options).await?;
    info!(id = %entry.id, "Generated prompt");
    Ok(Json(entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptsmith::generation::{GenerationError, GenerationErrorKind};

    #[test]
    fn input_error_maps_to_bad_request() {
        let err: ApiError = SessionError::Input(InputError::EmptyIdea).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Please enter a prompt idea.");
    }

    #[test]
    fn generation_error_maps_to_bad_gateway_with_kind() {
        let err: ApiError = SessionError::Generation(GenerationError::new(
            GenerationErrorKind::InvalidCredentials,
            "HTTP 400: API key not valid",
        ))
        .into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert_eq!(err.kind, "invalid-credentials");
        assert!(err.message.starts_with("Invalid API Key."));
        assert!(!err.message.contains("HTTP 400"));
    }

    #[test]
    fn options_request_deserializes_labels() {
        let json = r#"{"idea":"x","persona":"Legal Advisor","tone":"Academic","taskType":"Haiku"}"#;
        let options: PromptOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.persona, Persona::LegalAdvisor);
        assert_eq!(options.task_type, TaskType::Custom("Haiku".into()));
    }
}
