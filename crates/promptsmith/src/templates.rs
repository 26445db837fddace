//! Built-in prompt templates and quick-start examples.
//!
//! A template is a ready-made idea (with `[placeholders]` to fill in) plus
//! suggested persona, tone and task type. Templates are grouped into
//! [`TemplateCategory`]s; [`grouped`] lists them in category order.

use crate::options::{InputError, Persona, PromptOptions, TaskType, Tone};
use serde::Serialize;
use std::fmt;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemplateCategory {
    #[serde(rename = "Software Development")]
    SoftwareDevelopment,
    #[serde(rename = "Marketing & Content")]
    Marketing,
    #[serde(rename = "Creative & Writing")]
    Creative,
    #[serde(rename = "Data & Analysis")]
    DataAnalysis,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 4] = [
        TemplateCategory::SoftwareDevelopment,
        TemplateCategory::Marketing,
        TemplateCategory::Creative,
        TemplateCategory::DataAnalysis,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TemplateCategory::SoftwareDevelopment => "Software Development",
            TemplateCategory::Marketing => "Marketing & Content",
            TemplateCategory::Creative => "Creative & Writing",
            TemplateCategory::DataAnalysis => "Data & Analysis",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Suggested selections that come with a template.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Selections {
    pub persona: Persona,
    pub tone: Tone,
    pub task_type: TaskType,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct PromptTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub category: TemplateCategory,
    /// Idea text, possibly containing `[placeholders]`.
    pub template: &'static str,
    pub defaults: Selections,
}

impl PromptTemplate {
    /// Options pre-filled from this template.
    pub fn to_options(&self) -> PromptOptions {
        PromptOptions::new(
            self.template,
            self.defaults.persona,
            self.defaults.tone,
            self.defaults.task_type.clone(),
        )
    }
}

/// A one-click example shown to new users.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExamplePrompt {
    pub title: &'static str,
    pub idea: &'static str,
    pub persona: Persona,
    pub tone: Tone,
    pub task_type: TaskType,
}

impl ExamplePrompt {
    pub fn to_options(&self) -> PromptOptions {
        PromptOptions::new(self.idea, self.persona, self.tone, self.task_type.clone())
    }
}

const fn selections(persona: Persona, tone: Tone, task_type: TaskType) -> Selections {
    Selections {
        persona,
        tone,
        task_type,
    }
}

pub static TEMPLATES: [PromptTemplate; 10] = [
    // Software Development
    PromptTemplate {
        title: "React Component",
        description: "Generate a functional React component with props and state.",
        category: TemplateCategory::SoftwareDevelopment,
        template: "Create a reusable React component named `[ComponentName]` that functions as a [Component's Purpose, e.g., 'profile card']. It should accept the following props: `[prop1: type]`, `[prop2: type]`. The component should be styled using [Styling Method, e.g., Tailwind CSS] and manage its own state for [stateful logic, e.g., 'a counter'].",
        defaults: selections(Persona::SoftwareEngineer, Tone::Technical, TaskType::CodeGeneration),
    },
    PromptTemplate {
        title: "API Endpoint Docs",
        description: "Create clear and concise documentation for a REST API endpoint.",
        category: TemplateCategory::SoftwareDevelopment,
        template: "Generate documentation in Markdown for a REST API endpoint that handles [Endpoint's Purpose, e.g., 'fetching user data'].\n\n- **Endpoint Path:** `[e.g., /api/users/{id}]`\n- **HTTP Method:** `[e.g., GET]`\n- **Request Parameters:** `[e.g., id (integer)]`\n- **Success Response (200 OK):** Provide a JSON example.\n- **Error Response (404 Not Found):** Provide a JSON example.",
        defaults: selections(Persona::SoftwareEngineer, Tone::Professional, TaskType::ApiDesign),
    },
    PromptTemplate {
        title: "API Test Plan",
        description: "Generate a comprehensive test plan for a REST API endpoint.",
        category: TemplateCategory::SoftwareDevelopment,
        template: "Create a test plan for the API endpoint `[Endpoint Path, e.g., /api/products]`. The endpoint is for `[Purpose, e.g., creating a new product]`. Include test cases for: success scenarios (2xx), client errors (4xx), server errors (5xx), and security checks (e.g., authentication, input validation).",
        defaults: selections(Persona::SoftwareEngineer, Tone::Technical, TaskType::ApiTestingPlan),
    },
    PromptTemplate {
        title: "Frontend Bug Fix",
        description: "Get help diagnosing and fixing a frontend JavaScript error.",
        category: TemplateCategory::SoftwareDevelopment,
        template: "Analyze the following frontend code snippet and error message to identify the root cause and provide a fix.\n\n- **Framework:** `[e.g., React, Vue, Vanilla JS]`\n- **Error Message:** `[Paste the full error message here]`\n- **Code with the error:**\n```javascript\n[Paste the relevant code block here]\n```",
        defaults: selections(Persona::SoftwareEngineer, Tone::Technical, TaskType::FrontendErrorFix),
    },
    PromptTemplate {
        title: "Backend Bug Fix",
        description: "Get help diagnosing and fixing a backend code error.",
        category: TemplateCategory::SoftwareDevelopment,
        template: "Analyze the following backend code snippet and error message to identify the root cause and provide a fix.\n\n- **Language/Framework:** `[e.g., Node.js/Express, Python/Django]`\n- **Error Message:** `[Paste the full error message here]`\n- **Code with the error:**\n```javascript\n[Paste the relevant code block here]\n```",
        defaults: selections(Persona::SoftwareEngineer, Tone::Technical, TaskType::BackendErrorFix),
    },
    PromptTemplate {
        title: "Git Commit Message",
        description: "Write a conventional commit message for your code changes.",
        category: TemplateCategory::SoftwareDevelopment,
        template: "Generate a Conventional Commit message for the following changes:\n\n- **Type of change:** [e.g., feat, fix, chore, docs]\n- **Short description:** [A brief summary of the change]\n- **Longer description (optional):** [Provide more context, motivation, and implementation details if necessary]\n- **Breaking Change:** [Yes/No, and if yes, explain the impact]",
        defaults: selections(Persona::SoftwareEngineer, Tone::Professional, TaskType::TextSummarization),
    },
    // Marketing & Content
    PromptTemplate {
        title: "Blog Post Outline",
        description: "Structure a compelling blog post with key sections and talking points.",
        category: TemplateCategory::Marketing,
        template: "Create a detailed outline for a blog post titled '[Blog Post Title]'. The target audience is [Target Audience]. The outline should include:\n\n1.  **Introduction:** A strong hook to grab the reader's attention.\n2.  **Main Sections (3-4):** Each with a clear heading and 3-5 bullet points covering key ideas.\n3.  **Conclusion:** A summary of the main points and a clear call-to-action.",
        defaults: selections(Persona::MarketingExpert, Tone::Inspirational, TaskType::ContentCreation),
    },
    PromptTemplate {
        title: "Social Media Ad Copy",
        description: "Generate persuasive ad copy for a social media campaign.",
        category: TemplateCategory::Marketing,
        template: "Write 3 variations of ad copy for a [Social Media Platform, e.g., Instagram] campaign promoting [Product/Service].\n\n- **Key Benefit:** [The single most important benefit for the customer]\n- **Target Audience:** [Describe the ideal customer]\n- **Call to Action:** [What should the user do? e.g., 'Shop Now', 'Learn More']",
        defaults: selections(Persona::MarketingExpert, Tone::Casual, TaskType::ContentCreation),
    },
    // Creative & Writing
    PromptTemplate {
        title: "Character Profile",
        description: "Develop a detailed profile for a fictional character.",
        category: TemplateCategory::Creative,
        template: "Create a detailed character profile for a story. \n\n- **Name:** [Character's Name]\n- **Age:** [Character's Age]\n- **Appearance:** [Key physical features]\n- **Personality:** [List 3-5 key personality traits]\n- **Backstory:** [A brief paragraph about their history]\n- **Motivation:** [What drives them in the story?]",
        defaults: selections(Persona::CreativeWriter, Tone::Casual, TaskType::CreativeWriting),
    },
    // Data & Analysis
    PromptTemplate {
        title: "SQL Query Generation",
        description: "Generate a SQL query from a natural language description.",
        category: TemplateCategory::DataAnalysis,
        template: "Generate a SQL query to [Your Goal, e.g., 'find all users who signed up in the last 30 days and have made at least one purchase'].\n\n- **Tables Available:** `[e.g., users(id, name, signup_date), orders(id, user_id, amount, created_at)]`\n- **Database System:** `[e.g., PostgreSQL, MySQL]`",
        defaults: selections(Persona::DataScientist, Tone::Technical, TaskType::CodeGeneration),
    },
];

pub static EXAMPLE_PROMPTS: [ExamplePrompt; 4] = [
    ExamplePrompt {
        title: "React Component",
        idea: "Create a reusable React component named `[ComponentName]` that functions as a 'profile card'.",
        persona: Persona::SoftwareEngineer,
        tone: Tone::Technical,
        task_type: TaskType::CodeGeneration,
    },
    ExamplePrompt {
        title: "Blog Post Outline",
        idea: "Create a detailed outline for a blog post titled '[Blog Post Title]'.",
        persona: Persona::MarketingExpert,
        tone: Tone::Inspirational,
        task_type: TaskType::ContentCreation,
    },
    ExamplePrompt {
        title: "Character Profile",
        idea: "Create a detailed character profile for a story.",
        persona: Persona::CreativeWriter,
        tone: Tone::Casual,
        task_type: TaskType::CreativeWriting,
    },
    ExamplePrompt {
        title: "SQL Query Generation",
        idea: "Generate a SQL query to 'find all users who signed up in the last 30 days'.",
        persona: Persona::DataScientist,
        tone: Tone::Technical,
        task_type: TaskType::CodeGeneration,
    },
];

/// Templates grouped by category, in category order. Categories without
/// templates are omitted.
pub fn grouped() -> Vec<(TemplateCategory, Vec<&'static PromptTemplate>)> {
    TemplateCategory::ALL
        .into_iter()
        .map(|category| {
            let members: Vec<&'static PromptTemplate> =
                TEMPLATES.iter().filter(|t| t.category == category).collect();
            (category, members)
        })
        .filter(|(_, members)| !members.is_empty())
        .collect()
}

/// Find a template by title (case-insensitive) or by its slug.
pub fn find(title: &str) -> Option<&'static PromptTemplate> {
    let wanted = crate::options::slug(title);
    TEMPLATES.iter().find(|t| {
        t.title.eq_ignore_ascii_case(title.trim()) || crate::options::slug(t.title) == wanted
    })
}

// ── Option resolution ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("unknown template '{0}'")]
    UnknownTemplate(String),
    #[error(transparent)]
    Input(#[from] InputError),
}

/// Explicit selections layered over a starting point.
///
/// [`resolve`](OptionOverrides::resolve) starts from the named template's
/// defaults (or [`PromptOptions::default`]), then applies each selection
/// that is set, then the idea. The result is validated.
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    pub template: Option<String>,
    pub persona: Option<Persona>,
    pub tone: Option<Tone>,
    pub task_type: Option<TaskType>,
    pub idea: Option<String>,
}

impl OptionOverrides {
    pub fn resolve(&self) -> Result<PromptOptions, ResolveError> {
        let mut options = match &self.template {
            Some(name) => find(name)
                .ok_or_else(|| ResolveError::UnknownTemplate(name.clone()))?
                .to_options(),
            None => PromptOptions::default(),
        };
        if let Some(persona) = self.persona {
            options.persona = persona;
        }
        if let Some(tone) = self.tone {
            options.tone = tone;
        }
        if let Some(task) = &self.task_type {
            options.task_type = task.clone();
        }
        if let Some(idea) = &self.idea {
            options.idea = idea.clone();
        }

        options.validate()?;
        Ok(options)
    }
}
