//! Block builder for meta-prompt text.
//!
//! [`MetaPromptBuilder`] assembles a prompt from paragraphs and lists. Blocks
//! are joined with blank lines; empty blocks are skipped so a missing piece
//! never leaves a stray gap.

/// Builder for multi-block instruction text.
///
/// # Example
///
/// ```
/// use promptsmith::assembler::builder::MetaPromptBuilder;
///
/// let prompt = MetaPromptBuilder::new("You are a prompt engineer.")
///     .numbered("Attributes:", ["Persona: Data Scientist", "Tone: Academic"])
///     .bulleted("Sections:", ["Role & Goal", "Context"])
///     .raw("Return only the prompt.")
///     .build();
///
/// assert!(prompt.contains("1. Persona: Data Scientist"));
/// assert!(prompt.contains("- Role & Goal"));
/// assert!(prompt.ends_with("Return only the prompt."));
/// ```
pub struct MetaPromptBuilder {
    blocks: Vec<String>,
}

impl MetaPromptBuilder {
    /// Create a builder whose first block is `preamble`.
    pub fn new(preamble: impl Into<String>) -> Self {
        Self { blocks: Vec::new() }.raw(preamble)
    }

    /// Append a paragraph. Skipped if empty.
    pub fn raw(mut self, content: impl Into<String>) -> Self {
        let content = content.into();
        if !content.is_empty() {
            self.blocks.push(content);
        }
        self
    }

    /// Append an intro line followed by a `1.`-style numbered list.
    ///
    /// Skipped entirely if `items` is empty.
    pub fn numbered<I, S>(self, intro: &str, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<String> = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, item.as_ref()))
            .collect();
        self.list(intro, lines)
    }

    /// Append an intro line followed by a `-` bulleted list.
    ///
    /// Skipped entirely if `items` is empty.
    pub fn bulleted<I, S>(self, intro: &str, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<String> = items
            .into_iter()
            .map(|item| format!("- {}", item.as_ref()))
            .collect();
        self.list(intro, lines)
    }

    fn list(self, intro: &str, lines: Vec<String>) -> Self {
        if lines.is_empty() {
            return self;
        }
        let body = lines.join("\n");
        if intro.is_empty() {
            self.raw(body)
        } else {
            self.raw(format!("{intro}\n{body}"))
        }
    }

    /// Join all blocks with blank lines.
    pub fn build(self) -> String {
        self.blocks.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preamble_only() {
        assert_eq!(MetaPromptBuilder::new("Hello.").build(), "Hello.");
    }

    #[test]
    fn blocks_joined_with_blank_line() {
        let prompt = MetaPromptBuilder::new("A").raw("B").build();
        assert_eq!(prompt, "A\n\nB");
    }

    #[test]
    fn empty_raw_skipped() {
        let prompt = MetaPromptBuilder::new("A").raw("").raw("C").build();
        assert_eq!(prompt, "A\n\nC");
    }

    #[test]
    fn numbered_list_counts_from_one() {
        let prompt = MetaPromptBuilder::new("P")
            .numbered("Steps:", ["first", "second"])
            .build();
        assert_eq!(prompt, "P\n\nSteps:\n1. first\n2. second");
    }

    #[test]
    fn bulleted_list_without_intro() {
        let prompt = MetaPromptBuilder::new("P").bulleted("", ["x", "y"]).build();
        assert_eq!(prompt, "P\n\n- x\n- y");
    }

    #[test]
    fn empty_list_skipped() {
        let prompt = MetaPromptBuilder::new("P")
            .bulleted("Nothing here:", Vec::<String>::new())
            .build();
        assert_eq!(prompt, "P");
    }

    #[test]
    fn multiline_items_kept_verbatim() {
        let prompt = MetaPromptBuilder::new("P")
            .bulleted("Items:", ["line one\n```\ncode\n```"])
            .build();
        assert!(prompt.contains("- line one\n```\ncode\n```"));
    }
}
