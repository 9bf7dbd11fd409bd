//! Provider response types and text extraction
//!
//! Groq and OpenRouter both answer with the OpenAI chat-completion shape.
//! Only the first choice's message content is used; everything else is
//! metadata.

use super::ProviderError;
use serde::Deserialize;

/// Chat-completion body returned by the provider
#[derive(Debug, Clone, Deserialize)]
pub struct ModelResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
    /// Error object some providers send in place of choices
    #[serde(default)]
    pub error: Option<ErrorBody>,
}

/// Provider-side error reported inside a successful HTTP response
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Token accounting
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

impl ModelResponse {
    /// Build a response carrying a single completion
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            id: None,
            model: None,
            choices: vec![Choice {
                message: Some(ChoiceMessage {
                    content: Some(text.into()),
                }),
                finish_reason: Some("stop".to_string()),
            }],
            usage: None,
            error: None,
        }
    }

    /// Extract the generated text, discarding metadata
    ///
    /// An embedded provider error wins over any choices. A response without a
    /// first choice, without content, or whose content is blank is an error
    /// rather than an empty answer.
    pub fn into_text(self) -> Result<String, ProviderError> {
        if let Some(error) = self.error {
            let message = error
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "unknown error".to_string());
            tracing::warn!(
                code = ?error.code,
                message = %message,
                "Provider reported an error in a successful response"
            );
            return Err(ProviderError::Api { message });
        }

        if let Some(usage) = self.usage {
            tracing::debug!(
                id = ?self.id,
                model = ?self.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Provider token usage"
            );
        }

        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyCompletion)?;

        match choice.message.and_then(|m| m.content) {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => {
                tracing::debug!(
                    finish_reason = ?choice.finish_reason,
                    "Provider returned a choice without text"
                );
                Err(ProviderError::EmptyCompletion)
            }
        }
    }
}
