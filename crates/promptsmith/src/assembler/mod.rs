//! Meta-prompt assembly.
//!
//! [`assemble`] turns [`PromptOptions`] into the instruction text sent to the
//! generation service. It is a pure function of its input and the static
//! [`profiles`] table: no I/O, no randomness, byte-identical output for equal
//! input.
//!
//! The text always has the same shape:
//!
//! 1. framing (expert prompt engineer and objective)
//! 2. the idea, verbatim
//! 3. persona, tone and task as numbered directives
//! 4. the required sections of the generated prompt, with the task's format
//!    guidance and worked example filled in
//! 5. the "output only the prompt" closing instruction

pub mod builder;
pub mod profiles;

pub use builder::MetaPromptBuilder;
pub use profiles::{FALLBACK, TaskFormatProfile, profile_for};

use crate::options::PromptOptions;

const FRAMING: &str = "\
You are a world-class expert prompt engineer with decades of experience crafting \
highly effective prompts for advanced large language models.
Your task is to take a user's simple idea and transform it into a detailed, \
structured, and powerful prompt.";

const CLOSING: &str = "\
Your final output MUST be only the generated prompt text, without any introductory \
phrases like \"Here is the prompt:\" or any other conversational filler. Just the \
prompt itself.";

/// Headings of the sections the generated prompt must contain, in order.
pub const REQUIRED_SECTIONS: [&str; 7] = [
    "Role & Goal",
    "Context",
    "Step-by-Step Instructions",
    "Output Format Requirements",
    "Example",
    "Constraints & Rules",
    "Encourage Depth",
];

/// Build the meta-prompt for the given options.
///
/// The caller validates the idea first (see
/// [`PromptOptions::validate`](crate::options::PromptOptions::validate)); an
/// empty idea is still assembled, just not usefully.
pub fn assemble(options: &PromptOptions) -> String {
    let profile = profile_for(&options.task_type);
    let task = options.task_type.label();

    let attributes = [
        format!(
            "**Persona:** {}. The AI should adopt this persona for the entire response.",
            options.persona
        ),
        format!(
            "**Tone:** {}. The response should be written in this tone throughout.",
            options.tone
        ),
        format!("**Task:** {task}. This is the primary goal of the prompt."),
    ];

    let sections = [
        format!(
            "**{}:** Clearly define the AI's role and its primary objective.",
            REQUIRED_SECTIONS[0]
        ),
        format!(
            "**{}:** Provide necessary background or context for the task.",
            REQUIRED_SECTIONS[1]
        ),
        format!(
            "**{}:** Give clear, actionable steps if the task is complex.",
            REQUIRED_SECTIONS[2]
        ),
        format!(
            "**{}:** This is crucial. Create a dedicated section in the prompt that \
             explicitly defines the desired output format. For a \"{task}\" task, this \
             section must be very specific. {}",
            REQUIRED_SECTIONS[3], profile.format_guidance
        ),
        format!(
            "**{}:** Provide a small, clear example of the desired output format or style \
             to reinforce the format requirements. {}",
            REQUIRED_SECTIONS[4], profile.worked_example
        ),
        format!(
            "**{}:** Define any other boundaries or negative constraints (e.g., \"do not \
             use jargon\", \"avoid discussing topic X\").",
            REQUIRED_SECTIONS[5]
        ),
        format!(
            "**{}:** Ask for detailed, well-reasoned, and comprehensive output.",
            REQUIRED_SECTIONS[6]
        ),
    ];

    MetaPromptBuilder::new(FRAMING)
        .raw(format!("The user's core idea is: \"{}\"", options.idea))
        .numbered(
            "You must enhance this idea into a master prompt by incorporating the following attributes:",
            attributes,
        )
        .bulleted(
            "Construct a new prompt that includes these elements:",
            sections,
        )
        .raw(CLOSING)
        .build()
}
