//! Configuration management for chatrelay
//!
//! Settings come from an optional TOML file (server, provider, observability)
//! while the provider credential is always read from the environment.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::str::FromStr;

const GROQ_DEFAULT_MODEL: &str = "meta-llama/llama-4-maverick-17b-128e-instruct";
const GROQ_DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const OPENROUTER_DEFAULT_MODEL: &str = "deepseek/deepseek-chat-v3-0324:free";
const OPENROUTER_DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const OPENROUTER_DEFAULT_REFERER: &str = "http://localhost:8000";
const OPENROUTER_DEFAULT_TITLE: &str = "chatrelay";

/// Upper bound for `server.request_timeout_seconds`
pub const MAX_REQUEST_TIMEOUT_SECONDS: u64 = 300;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound on a single provider call
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Install the permissive CORS layer. Unset means "use the provider default".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissive_cors: Option<bool>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
            permissive_cors: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_request_timeout() -> u64 {
    60
}

/// Which hosted provider the relay talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Groq,
    #[value(name = "openrouter")]
    OpenRouter,
}

impl ProviderKind {
    /// Environment variable holding this provider's API key
    pub fn credential_var(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "GROQ_API_KEY",
            ProviderKind::OpenRouter => "OPENROUTER_API_KEY",
        }
    }

    /// Human-readable provider name
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "Groq",
            ProviderKind::OpenRouter => "OpenRouter",
        }
    }

    /// Whether the permissive CORS layer is on when the config leaves it unset
    pub fn permissive_cors_by_default(&self) -> bool {
        matches!(self, ProviderKind::Groq)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Provider-specific settings
///
/// Tagged by `kind` in TOML:
///
/// ```toml
/// [provider]
/// kind = "openrouter"
/// model = "deepseek/deepseek-chat-v3-0324:free"
/// title = "my-app"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProviderConfig {
    Groq(GroqSettings),
    #[serde(rename = "openrouter")]
    OpenRouter(OpenRouterSettings),
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::Groq(GroqSettings::default())
    }
}

/// Groq settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GroqSettings {
    #[serde(default = "default_groq_model")]
    model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
}

impl Default for GroqSettings {
    fn default() -> Self {
        Self {
            model: default_groq_model(),
            base_url: None,
        }
    }
}

fn default_groq_model() -> String {
    GROQ_DEFAULT_MODEL.to_string()
}

/// OpenRouter settings
///
/// `referer` and `title` are sent as `HTTP-Referer` / `X-Title` on every call,
/// which OpenRouter uses to attribute traffic to an application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OpenRouterSettings {
    #[serde(default = "default_openrouter_model")]
    model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(default = "default_openrouter_referer")]
    referer: String,
    #[serde(default = "default_openrouter_title")]
    title: String,
}

impl Default for OpenRouterSettings {
    fn default() -> Self {
        Self {
            model: default_openrouter_model(),
            base_url: None,
            referer: default_openrouter_referer(),
            title: default_openrouter_title(),
        }
    }
}

fn default_openrouter_model() -> String {
    OPENROUTER_DEFAULT_MODEL.to_string()
}

fn default_openrouter_referer() -> String {
    OPENROUTER_DEFAULT_REFERER.to_string()
}

fn default_openrouter_title() -> String {
    OPENROUTER_DEFAULT_TITLE.to_string()
}

impl ProviderConfig {
    /// Default settings for a provider
    pub fn for_kind(kind: ProviderKind) -> Self {
        match kind {
            ProviderKind::Groq => ProviderConfig::Groq(GroqSettings::default()),
            ProviderKind::OpenRouter => ProviderConfig::OpenRouter(OpenRouterSettings::default()),
        }
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            ProviderConfig::Groq(_) => ProviderKind::Groq,
            ProviderConfig::OpenRouter(_) => ProviderKind::OpenRouter,
        }
    }

    /// Model identifier sent with every completion request
    pub fn model(&self) -> &str {
        match self {
            ProviderConfig::Groq(s) => &s.model,
            ProviderConfig::OpenRouter(s) => &s.model,
        }
    }

    /// API root, falling back to the provider's public endpoint
    pub fn base_url(&self) -> &str {
        match self {
            ProviderConfig::Groq(s) => s.base_url.as_deref().unwrap_or(GROQ_DEFAULT_BASE_URL),
            ProviderConfig::OpenRouter(s) => {
                s.base_url.as_deref().unwrap_or(OPENROUTER_DEFAULT_BASE_URL)
            }
        }
    }

    /// Static headers attached to every provider call
    pub fn extra_headers(&self) -> Vec<(&'static str, &str)> {
        match self {
            ProviderConfig::Groq(_) => Vec::new(),
            ProviderConfig::OpenRouter(s) => {
                vec![("HTTP-Referer", s.referer.as_str()), ("X-Title", s.title.as_str())]
            }
        }
    }

    /// Replace the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        match &mut self {
            ProviderConfig::Groq(s) => s.model = model.into(),
            ProviderConfig::OpenRouter(s) => s.model = model.into(),
        }
        self
    }

    /// Override the API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        match &mut self {
            ProviderConfig::Groq(s) => s.base_url = Some(base_url.into()),
            ProviderConfig::OpenRouter(s) => s.base_url = Some(base_url.into()),
        }
        self
    }
}

/// Provider API key
///
/// `Debug` is redacted so the key never reaches logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a key. Returns `None` for empty or whitespace-only input.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Read the credential for `kind` from the process environment
    pub fn from_env(kind: ProviderKind) -> AppResult<Self> {
        Self::from_lookup(kind, |var| std::env::var(var).ok())
    }

    /// Read the credential for `kind` through an arbitrary variable lookup
    pub fn from_lookup<F>(kind: ProviderKind, lookup: F) -> AppResult<Self>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let var = kind.credential_var();
        lookup(var)
            .and_then(Self::new)
            .ok_or(AppError::MissingCredential { var })
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Built-in defaults for a provider
    pub fn for_provider(kind: ProviderKind) -> Self {
        Self {
            provider: ProviderConfig::for_kind(kind),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path_display = path.as_ref().display().to_string();

        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|source| AppError::ConfigFileRead {
                path: path_display.clone(),
                source,
            })?;

        let config: Self = toml::from_str(&content).map_err(|source| AppError::ConfigParseFailed {
            path: path_display.clone(),
            source,
        })?;

        config
            .validate()
            .map_err(|e| AppError::ConfigValidationFailed {
                path: path_display,
                reason: e.to_string(),
            })?;

        Ok(config)
    }

    /// Load from `path` when given, otherwise use the built-in defaults
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Switch provider, keeping the file's settings when it already names that provider
    pub fn with_provider_kind(mut self, kind: ProviderKind) -> Self {
        if self.provider.kind() != kind {
            tracing::debug!(
                from = %self.provider.kind(),
                to = %kind,
                "Provider overridden, using provider defaults"
            );
            self.provider = ProviderConfig::for_kind(kind);
        }
        self
    }

    /// Address the listener binds to
    pub fn bind_addr(&self) -> AppResult<SocketAddr> {
        let ip = self.server.host.parse::<IpAddr>().map_err(|_| {
            AppError::Config(format!(
                "server.host '{}' must be an IP address such as 127.0.0.1 or 0.0.0.0",
                self.server.host
            ))
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Effective CORS setting after applying the provider default
    pub fn permissive_cors(&self) -> bool {
        self.server
            .permissive_cors
            .unwrap_or_else(|| self.provider.kind().permissive_cors_by_default())
    }

    /// Validate configuration after parsing
    ///
    /// Called by `from_file()` and `from_str()`; call it explicitly when
    /// building a `Config` in code.
    pub fn validate(&self) -> AppResult<()> {
        self.bind_addr()?;

        if self.server.request_timeout_seconds == 0 {
            return Err(AppError::Config(
                "request_timeout_seconds must be greater than 0".to_string(),
            ));
        }
        if self.server.request_timeout_seconds > MAX_REQUEST_TIMEOUT_SECONDS {
            return Err(AppError::Config(format!(
                "request_timeout_seconds cannot exceed {} seconds, got {}",
                MAX_REQUEST_TIMEOUT_SECONDS, self.server.request_timeout_seconds
            )));
        }

        if self.provider.model().trim().is_empty() {
            return Err(AppError::Config(format!(
                "provider.model must not be empty for {}",
                self.provider.kind()
            )));
        }

        let base_url = self.provider.base_url();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "provider.base_url '{}' must start with 'http://' or 'https://'",
                base_url
            )));
        }

        for (name, value) in self.provider.extra_headers() {
            if reqwest::header::HeaderValue::from_str(value).is_err() {
                return Err(AppError::Config(format!(
                    "provider header {} has an invalid value {:?}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

impl FromStr for Config {
    type Err = AppError;

    fn from_str(toml_str: &str) -> Result<Self, Self::Err> {
        let config: Config =
            toml::from_str(toml_str).map_err(|source| AppError::ConfigParseFailed {
                path: "<string>".to_string(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }
}
