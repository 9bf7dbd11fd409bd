//! Prompt rendering, provider client, and response extraction
//!
//! [`answer`] runs the whole single-turn pipeline against any [`ChatModel`].

pub mod client;
pub mod prompt;
pub mod response;

pub use client::{ChatModel, ProviderClient, ProviderError};
pub use prompt::{PromptMessage, Role};
pub use response::ModelResponse;

/// Render `question`, send it to `model`, and return the completion text
pub async fn answer(model: &dyn ChatModel, question: &str) -> Result<String, ProviderError> {
    let messages = prompt::render(question);
    let response = model.complete(&messages).await?;
    response.into_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records the prompt it receives and answers with a fixed response
    struct RecordingModel {
        reply: &'static str,
        seen: Mutex<Vec<PromptMessage>>,
    }

    #[async_trait]
    impl ChatModel for RecordingModel {
        fn model(&self) -> &str {
            "recording"
        }

        async fn complete(
            &self,
            messages: &[PromptMessage],
        ) -> Result<ModelResponse, ProviderError> {
            self.seen.lock().unwrap().extend_from_slice(messages);
            Ok(ModelResponse::from_text(self.reply))
        }
    }

    #[tokio::test]
    async fn test_answer_sends_rendered_prompt() {
        let model = RecordingModel {
            reply: "4",
            seen: Mutex::new(Vec::new()),
        };

        let text = answer(&model, "What is 2+2?").await.unwrap();

        assert_eq!(text, "4");
        assert_eq!(*model.seen.lock().unwrap(), prompt::render("What is 2+2?"));
    }

    #[tokio::test]
    async fn test_answer_fails_on_blank_completion() {
        let model = RecordingModel {
            reply: "",
            seen: Mutex::new(Vec::new()),
        };

        let result = answer(&model, "anything").await;
        assert!(matches!(result, Err(ProviderError::EmptyCompletion)));
    }
}
