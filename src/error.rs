//! Error types for chatrelay
//!
//! All errors implement `IntoResponse` for Axum handlers. Every failure
//! leaves the service with the same body shape: `{"detail": "<message>"}`.

use crate::models::ProviderError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing {var}. Set it in the environment or in a .env file.")]
    MissingCredential { var: &'static str },

    #[error("Failed to read config file {path}")]
    ConfigFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config {path}")]
    ConfigParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config {path}: {reason}")]
    ConfigValidationFailed { path: String, reason: String },

    #[error("{message}")]
    Validation { status: StatusCode, message: String },

    #[error(transparent)]
    Upstream(#[from] ProviderError),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { status, .. } => *status,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_)
            | Self::Config(_)
            | Self::MissingCredential { .. }
            | Self::ConfigFileRead { .. }
            | Self::ConfigParseFailed { .. }
            | Self::ConfigValidationFailed { .. }
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match &rejection {
            JsonRejection::MissingJsonContentType(_) => {
                "Content-Type must be application/json".to_string()
            }
            _ => rejection.body_text(),
        };
        Self::Validation {
            status: rejection.status(),
            message,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(serde_json::json!({
            "detail": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;
