//! Prompt service: validates user input before building a prompt

use serde_json::Value;
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::envelope::request_payload;
use crate::domain::{build_prompt, PromptMode};

#[derive(Debug, Default)]
pub struct PromptService;

impl PromptService {
    pub fn new() -> Self {
        Self
    }

    /// Build the prompt text. Blank content is rejected.
    pub fn prompt(&self, mode: PromptMode, content: &str) -> ApplicationResult<String> {
        if content.trim().is_empty() {
            return Err(ApplicationError::EmptyInput(format!("{} content", mode)));
        }
        debug!("prompt: mode={}, content_len={}", mode, content.len());
        Ok(build_prompt(mode, content))
    }

    /// Build the prompt wrapped in a `generateContent` request body.
    pub fn payload(&self, mode: PromptMode, content: &str) -> ApplicationResult<Value> {
        Ok(request_payload(&self.prompt(mode, content)?))
    }
}
