//! HTTP request handlers for the chatrelay API

use crate::config::{Config, Credential};
use crate::error::{AppError, AppResult};
use crate::metrics::Metrics;
use crate::models::{ChatModel, ProviderClient};
use std::sync::Arc;
use std::time::Duration;

pub mod chat;
pub mod extractor;
pub mod metrics;
pub mod root;

/// Application state shared across all handlers
///
/// Built once at startup. All fields are Arc'd for cheap cloning across
/// Axum handlers; nothing in here is mutated after construction.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    model: Arc<dyn ChatModel>,
    metrics: Arc<Metrics>,
    greeting: Arc<str>,
}

impl AppState {
    /// Create state backed by the real provider client
    pub fn new(config: Config, credential: Credential) -> AppResult<Self> {
        let timeout = Duration::from_secs(config.server.request_timeout_seconds);
        let client = ProviderClient::new(&config.provider, &credential, timeout)?;
        Self::with_model(config, Arc::new(client))
    }

    /// Create state reading the provider credential from the environment
    ///
    /// Fails with [`AppError::MissingCredential`] when the variable is unset
    /// or blank.
    pub fn from_env(config: Config) -> AppResult<Self> {
        let credential = Credential::from_env(config.provider.kind())?;
        Self::new(config, credential)
    }

    /// Create state around any model implementation
    pub fn with_model(config: Config, model: Arc<dyn ChatModel>) -> AppResult<Self> {
        let metrics = Metrics::new()
            .map_err(|e| AppError::Internal(format!("Failed to initialize metrics: {}", e)))?;

        let greeting = format!(
            "chatrelay is running with {} on {}! Use the /chat endpoint.",
            config.provider.model(),
            config.provider.kind()
        );

        Ok(Self {
            config: Arc::new(config),
            model,
            metrics: Arc::new(metrics),
            greeting: greeting.into(),
        })
    }

    /// Get reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the model client
    pub fn model(&self) -> &dyn ChatModel {
        self.model.as_ref()
    }

    /// Get reference to the metrics collector
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Static welcome text served at `GET /`
    pub fn greeting(&self) -> &str {
        &self.greeting
    }
}
