//! Prompt template for the chat pipeline
//!
//! Every request is rendered into the same two-message conversation: a fixed
//! system instruction followed by the user's question.

use serde::Serialize;

/// System instruction sent ahead of every question
pub const SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";

/// Chat role of a prompt message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single message in the rendered prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Render the prompt for `question`
///
/// The question is inserted verbatim (no escaping or trimming); an empty
/// question is valid and still yields two messages.
pub fn render(question: &str) -> Vec<PromptMessage> {
    vec![
        PromptMessage::system(SYSTEM_PROMPT),
        PromptMessage::user(format!("Question: {question}")),
    ]
}
