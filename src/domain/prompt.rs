//! Prompt builder: turns a user question or code snippet into model instructions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::section::SectionMarker;

/// What kind of input the user submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptMode {
    Question,
    Code,
}

impl PromptMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PromptMode::Question => "question",
            PromptMode::Code => "code",
        }
    }
}

impl fmt::Display for PromptMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "question" => Ok(PromptMode::Question),
            "code" => Ok(PromptMode::Code),
            other => Err(DomainError::InvalidMode(other.to_string())),
        }
    }
}

const TREE_EXAMPLE: &str = r#"```json
{
  "name": "f(4)",
  "children": [
    {
      "name": "f(3)",
      "children": [...]
    },
    ...
  ]
}
```"#;

/// Heading and instruction text for one section, per mode.
fn section_instructions(marker: SectionMarker, mode: PromptMode) -> (&'static str, &'static str) {
    match (marker, mode) {
        (SectionMarker::Explanation, PromptMode::Question) => (
            "Question Explanation:",
            "Explain what the question is asking in simple terms. Make sure to clarify the context and requirements.",
        ),
        (SectionMarker::Explanation, PromptMode::Code) => (
            "Code Explanation:",
            "Explain what this code does in simple terms. Make sure to clarify the context and requirements.",
        ),
        (SectionMarker::RecursiveSolution, _) => (
            "Recursive Solution Explanation:",
            "Describe the recursive solution step-by-step in detail using a sample input (e.g., n = 4) to illustrate how the recursion works.",
        ),
        (SectionMarker::TreeJson, PromptMode::Question) => (
            "Recursion Tree (JSON format):",
            "Provide the recursion tree as a JSON object representing the function calls and their children.",
        ),
        (SectionMarker::TreeJson, PromptMode::Code) => (
            "Recursion Tree (JSON format):",
            "Provide the recursion tree as a JSON object for a sample input (e.g., n = 4) showing each function call and base case.",
        ),
        (SectionMarker::Complexity, _) => (
            "Time Complexity and Optimizations:",
            "Explain the time complexity and any optimization techniques like memoization. Also provide the most optimized version of the code in C++.",
        ),
    }
}

/// Build the instruction prompt for `content`.
///
/// The section headings start with the glyphs of [`SectionMarker::ALL`] in
/// order; the response splitter relies on those exact bytes.
pub fn build_prompt(mode: PromptMode, content: &str) -> String {
    let mut prompt = String::new();

    match mode {
        PromptMode::Question => {
            prompt.push_str("I have the following question:\n\n");
            prompt.push_str(content);
            prompt.push_str("\n\n");
        }
        PromptMode::Code => {
            prompt.push_str("I have the following code:\n\n```\n");
            prompt.push_str(content);
            prompt.push_str("\n```\n\n");
        }
    }

    prompt.push_str("Please provide the response in the following format with section headers:\n\n");

    for marker in SectionMarker::ALL {
        let (heading, instruction) = section_instructions(marker, mode);
        prompt.push_str(&format!("{} {}\n{}\n", marker.glyph(), heading, instruction));
        if marker == SectionMarker::TreeJson {
            prompt.push_str("Use a fenced code block tagged `json` for the tree.\nExample:\n");
            prompt.push_str(TREE_EXAMPLE);
            prompt.push('\n');
        }
        prompt.push('\n');
    }

    prompt.push_str(
        "Make sure the recursion tree JSON is well-structured so it can be parsed easily for graphical rendering. \
         Every node must have a \"name\" string and a \"children\" array (empty for base cases).\n",
    );
    prompt
}
