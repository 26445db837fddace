//! User-selectable prompt options: persona, tone, task type, and the
//! [`PromptOptions`] bundle handed to the assembler.
//!
//! Every option has a human-readable label (what the UI shows and what is
//! persisted) and a kebab-case slug (what the CLI accepts). Parsing accepts
//! either form, case-insensitively.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message shown when the idea field is empty.
pub const EMPTY_IDEA_MESSAGE: &str = "Please enter a prompt idea.";

// ── Errors ─────────────────────────────────────────────────────────

/// Caller-level validation failure, surfaced before assembly is attempted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// The idea is empty or whitespace only.
    #[error("{}", EMPTY_IDEA_MESSAGE)]
    EmptyIdea,
}

/// A persona, tone or task type string that matches no known option.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

impl UnknownOption {
    fn new(kind: &'static str, value: &str, labels: impl Iterator<Item = &'static str>) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: labels.map(slug).collect::<Vec<_>>().join(", "),
        }
    }
}

/// Kebab-case slug of a label: `"UI/UX Feedback"` → `"ui-ux-feedback"`.
pub fn slug(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

fn matches_label(input: &str, label: &str) -> bool {
    input.trim().eq_ignore_ascii_case(label) || slug(input) == slug(label)
}

// ── Persona ────────────────────────────────────────────────────────

/// The expert persona the generated prompt asks the model to adopt.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Persona {
    #[serde(rename = "Software Engineer")]
    SoftwareEngineer,
    #[serde(rename = "Marketing Expert")]
    MarketingExpert,
    #[serde(rename = "Creative Writer")]
    CreativeWriter,
    #[serde(rename = "Data Scientist")]
    DataScientist,
    #[serde(rename = "UX Designer")]
    UxDesigner,
    #[serde(rename = "Legal Advisor")]
    LegalAdvisor,
}

impl Persona {
    /// All personas in display order.
    pub const ALL: [Persona; 6] = [
        Persona::SoftwareEngineer,
        Persona::MarketingExpert,
        Persona::CreativeWriter,
        Persona::DataScientist,
        Persona::UxDesigner,
        Persona::LegalAdvisor,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Persona::SoftwareEngineer => "Software Engineer",
            Persona::MarketingExpert => "Marketing Expert",
            Persona::CreativeWriter => "Creative Writer",
            Persona::DataScientist => "Data Scientist",
            Persona::UxDesigner => "UX Designer",
            Persona::LegalAdvisor => "Legal Advisor",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Persona {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| matches_label(s, p.label()))
            .ok_or_else(|| UnknownOption::new("persona", s, Self::ALL.iter().map(|p| p.label())))
    }
}

// ── Tone ───────────────────────────────────────────────────────────

/// The tone the generated prompt asks the model to write in.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tone {
    Professional,
    Casual,
    Humorous,
    Inspirational,
    Technical,
    Academic,
}

impl Tone {
    /// All tones in display order.
    pub const ALL: [Tone; 6] = [
        Tone::Professional,
        Tone::Casual,
        Tone::Humorous,
        Tone::Inspirational,
        Tone::Technical,
        Tone::Academic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Humorous => "Humorous",
            Tone::Inspirational => "Inspirational",
            Tone::Technical => "Technical",
            Tone::Academic => "Academic",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tone {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| matches_label(s, t.label()))
            .ok_or_else(|| UnknownOption::new("tone", s, Self::ALL.iter().map(|t| t.label())))
    }
}

// ── TaskType ───────────────────────────────────────────────────────

/// The kind of task the generated prompt is for.
///
/// Known task types each have a dedicated format profile in
/// [`assembler::profiles`](crate::assembler::profiles). [`TaskType::Custom`]
/// carries any other label (from an older or newer client, or a hand-edited
/// history file) and is assembled with the generic fallback profile. A
/// `Custom` built by hand around a known label still gets that task's
/// profile; prefer [`TaskType::from_label`] to get the typed variant.
///
/// Serialized as its display label.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum TaskType {
    CodeGeneration,
    ApiDesign,
    ApiTestingPlan,
    DatabaseSchemaDesign,
    SystemArchitectureDesign,
    CodeReviewFeedback,
    DebuggingAssistance,
    FrontendErrorFix,
    BackendErrorFix,
    E2eTestPlan,
    TextSummarization,
    CreativeWriting,
    DataAnalysisPlan,
    UiUxFeedback,
    ContentCreation,
    /// A task label with no dedicated profile.
    Custom(String),
}

impl TaskType {
    /// All known task types in display order.
    pub const KNOWN: [TaskType; 15] = [
        TaskType::CodeGeneration,
        TaskType::ApiDesign,
        TaskType::ApiTestingPlan,
        TaskType::DatabaseSchemaDesign,
        TaskType::SystemArchitectureDesign,
        TaskType::CodeReviewFeedback,
        TaskType::DebuggingAssistance,
        TaskType::FrontendErrorFix,
        TaskType::BackendErrorFix,
        TaskType::E2eTestPlan,
        TaskType::TextSummarization,
        TaskType::CreativeWriting,
        TaskType::DataAnalysisPlan,
        TaskType::UiUxFeedback,
        TaskType::ContentCreation,
    ];

    pub fn label(&self) -> &str {
        match self {
            TaskType::Custom(label) => label,
            known => known.known_label().unwrap_or_default(),
        }
    }

    /// Resolve a label to a task type, falling back to [`TaskType::Custom`].
    ///
    /// Unlike [`FromStr`], this never fails.
    pub fn from_label(label: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|t| matches_label(label, t.label()))
            .unwrap_or_else(|| TaskType::Custom(label.to_string()))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, TaskType::Custom(_))
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Strict parse: only known task types are accepted.
impl FromStr for TaskType {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_label(s) {
            TaskType::Custom(_) => Err(UnknownOption::new(
                "task type",
                s,
                Self::KNOWN.iter().filter_map(TaskType::known_label),
            )),
            known => Ok(known),
        }
    }
}

impl TaskType {
    fn known_label(&self) -> Option<&'static str> {
        Some(match self {
            TaskType::CodeGeneration => "Code Generation",
            TaskType::ApiDesign => "API Design",
            TaskType::ApiTestingPlan => "API Testing Plan",
            TaskType::DatabaseSchemaDesign => "Database Schema Design",
            TaskType::SystemArchitectureDesign => "System Architecture Design",
            TaskType::CodeReviewFeedback => "Code Review Feedback",
            TaskType::DebuggingAssistance => "Debugging Assistance",
            TaskType::FrontendErrorFix => "Frontend Error Fix",
            TaskType::BackendErrorFix => "Backend Error Fix",
            TaskType::E2eTestPlan => "E2E Test Plan",
            TaskType::TextSummarization => "Text Summarization",
            TaskType::CreativeWriting => "Creative Writing",
            TaskType::DataAnalysisPlan => "Data Analysis Plan",
            TaskType::UiUxFeedback => "UI/UX Feedback",
            TaskType::ContentCreation => "Content Creation",
            TaskType::Custom(_) => return None,
        })
    }
}

impl From<String> for TaskType {
    fn from(label: String) -> Self {
        TaskType::from_label(&label)
    }
}

impl From<TaskType> for String {
    fn from(task: TaskType) -> Self {
        match task {
            TaskType::Custom(label) => label,
            known => known.label().to_string(),
        }
    }
}

// ── PromptOptions ──────────────────────────────────────────────────

/// Everything the assembler needs: the user's idea plus the three selections.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PromptOptions {
    pub idea: String,
    pub persona: Persona,
    pub tone: Tone,
    pub task_type: TaskType,
}

impl PromptOptions {
    pub fn new(idea: impl Into<String>, persona: Persona, tone: Tone, task_type: TaskType) -> Self {
        Self {
            idea: idea.into(),
            persona,
            tone,
            task_type,
        }
    }

    /// Reject an idea that is empty after trimming whitespace.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.idea.trim().is_empty() {
            Err(InputError::EmptyIdea)
        } else {
            Ok(())
        }
    }
}

impl Default for PromptOptions {
    /// The form's initial state: empty idea, Software Engineer, Professional,
    /// Code Generation.
    fn default() -> Self {
        Self {
            idea: String::new(),
            persona: Persona::SoftwareEngineer,
            tone: Tone::Professional,
            task_type: TaskType::CodeGeneration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_handles_punctuation() {
        assert_eq!(slug("UI/UX Feedback"), "ui-ux-feedback");
        assert_eq!(slug("E2E Test Plan"), "e2e-test-plan");
        assert_eq!(slug("  Software Engineer "), "software-engineer");
    }

    #[test]
    fn persona_parses_label_and_slug() {
        assert_eq!("Software Engineer".parse(), Ok(Persona::SoftwareEngineer));
        assert_eq!("ux-designer".parse(), Ok(Persona::UxDesigner));
        assert_eq!("LEGAL ADVISOR".parse(), Ok(Persona::LegalAdvisor));
    }

    #[test]
    fn unknown_persona_lists_expected_values() {
        let err = "astronaut".parse::<Persona>().unwrap_err();
        assert_eq!(err.kind, "persona");
        assert!(err.expected.contains("software-engineer"));
        assert!(err.to_string().contains("astronaut"));
    }

    #[test]
    fn tone_parses_case_insensitively() {
        assert_eq!("technical".parse(), Ok(Tone::Technical));
        assert!("grumpy".parse::<Tone>().is_err());
    }

    #[test]
    fn task_type_strict_parse_rejects_unknown() {
        assert_eq!("ui-ux-feedback".parse(), Ok(TaskType::UiUxFeedback));
        let err = "Poetry Slam".parse::<TaskType>().unwrap_err();
        assert!(err.expected.contains("code-generation"));
        assert!(!err.expected.contains(", ,"));
    }

    #[test]
    fn task_type_lenient_label_falls_back_to_custom() {
        assert_eq!(TaskType::from_label("API Design"), TaskType::ApiDesign);
        let custom = TaskType::from_label("Poetry Slam");
        assert!(custom.is_custom());
        assert_eq!(custom.label(), "Poetry Slam");
    }

    #[test]
    fn task_type_serializes_as_label() {
        let json = serde_json::to_string(&TaskType::E2eTestPlan).unwrap();
        assert_eq!(json, "\"E2E Test Plan\"");
        let parsed: TaskType = serde_json::from_str("\"Haiku Writing\"").unwrap();
        assert_eq!(parsed, TaskType::Custom("Haiku Writing".into()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"Haiku Writing\"");
    }

    #[test]
    fn every_known_task_label_round_trips() {
        for task in TaskType::KNOWN {
            assert_eq!(TaskType::from_label(task.label()), task);
        }
    }

    #[test]
    fn options_use_original_field_names() {
        let opts = PromptOptions::new(
            "a CSV parser",
            Persona::DataScientist,
            Tone::Academic,
            TaskType::CodeGeneration,
        );
        let json = serde_json::to_value(&opts).unwrap();
        assert_eq!(json["taskType"], "Code Generation");
        assert_eq!(json["persona"], "Data Scientist");
        assert_eq!(json["tone"], "Academic");
    }

    #[test]
    fn validate_rejects_blank_idea() {
        let mut opts = PromptOptions::default();
        assert_eq!(opts.validate(), Err(InputError::EmptyIdea));
        opts.idea = "   \n\t".into();
        assert_eq!(opts.validate(), Err(InputError::EmptyIdea));
        opts.idea = " x ".into();
        assert!(opts.validate().is_ok());
        assert_eq!(InputError::EmptyIdea.to_string(), EMPTY_IDEA_MESSAGE);
    }
}
