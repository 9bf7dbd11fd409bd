//! Provider client for OpenAI-compatible chat-completion APIs
//!
//! Groq and OpenRouter expose the same `/chat/completions` contract; they
//! differ only in API root, model id, and OpenRouter's attribution headers.

use super::prompt::PromptMessage;
use super::response::ModelResponse;
use crate::config::{Credential, ProviderConfig, ProviderKind};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single provider call
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Failed to reach provider: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Provider did not respond within {after:?}")]
    Timeout { after: Duration },

    #[error("Provider returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to decode provider response: {0}")]
    Decode(String),

    #[error("Provider error: {message}")]
    Api { message: String },

    #[error("Provider returned no completion text")]
    EmptyCompletion,
}

/// A remote text-generation model
///
/// Implemented by [`ProviderClient`] in production; tests plug in fakes.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Model identifier requests are sent to
    fn model(&self) -> &str;

    /// Send the rendered prompt and return the raw provider response
    async fn complete(&self, messages: &[PromptMessage]) -> Result<ModelResponse, ProviderError>;
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [PromptMessage],
}

/// HTTP client bound to one provider, model, and credential
///
/// Built once at startup and shared by every request; the inner
/// `reqwest::Client` pools connections.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    kind: ProviderKind,
    model: String,
    endpoint: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl ProviderClient {
    /// Create a client from provider settings
    ///
    /// The credential and any provider headers become default headers of the
    /// underlying HTTP client, so they ride on every call.
    pub fn new(
        provider: &ProviderConfig,
        credential: &Credential,
        timeout: Duration,
    ) -> AppResult<Self> {
        let mut headers = HeaderMap::new();

        let bearer = format!("Bearer {}", credential.expose());
        let mut auth = HeaderValue::from_str(&bearer).map_err(|_| {
            AppError::Config(format!(
                "{} contains characters that are not valid in an HTTP header",
                provider.kind().credential_var()
            ))
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        for (name, value) in provider.extra_headers() {
            let value = HeaderValue::from_str(value).map_err(|e| {
                AppError::Config(format!("Invalid value for header {}: {}", name, e))
            })?;
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                AppError::Config(format!("Invalid header name {}: {}", name, e))
            })?;
            headers.insert(name, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = provider.base_url().trim_end_matches('/');
        let endpoint = format!("{}/chat/completions", base_url);

        tracing::debug!(
            provider = %provider.kind(),
            model = %provider.model(),
            endpoint = %endpoint,
            timeout_ms = timeout.as_millis() as u64,
            "Provider client configured"
        );

        Ok(Self {
            kind: provider.kind(),
            model: provider.model().to_string(),
            endpoint,
            timeout,
            http,
        })
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Full chat-completions URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, messages: &[PromptMessage]) -> Result<ModelResponse, ProviderError> {
        let request = CompletionRequest {
            model: &self.model,
            messages,
        };

        let response = self.http.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unable to read response body: {}>", e));
            return Err(ProviderError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ChatModel for ProviderClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, messages: &[PromptMessage]) -> Result<ModelResponse, ProviderError> {
        match tokio::time::timeout(self.timeout, self.send(messages)).await {
            Ok(result) => result,
            Err(_elapsed) => {
                tracing::warn!(
                    provider = %self.kind,
                    endpoint = %self.endpoint,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Provider call timed out"
                );
                Err(ProviderError::Timeout {
                    after: self.timeout,
                })
            }
        }
    }
}
