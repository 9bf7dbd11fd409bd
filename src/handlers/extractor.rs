//! JSON extractor that reports rejections in the API's error shape
//!
//! Wraps Axum's `Json` so a malformed body produces `{"detail": ...}` with
//! the rejection's 4xx status instead of Axum's plain-text body:
//! - JSON syntax errors → 400 Bad Request
//! - Data errors (missing/mistyped fields) → 422 Unprocessable Entity
//! - Missing content type → 415 Unsupported Media Type

use crate::error::AppError;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

/// Use instead of `axum::Json` in handlers that take a JSON body
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                tracing::debug!(
                    status = %rejection.status(),
                    reason = %rejection.body_text(),
                    "Rejected request body"
                );
                Err(AppError::from(rejection))
            }
        }
    }
}
