//! Chat endpoint handler
//!
//! Handles POST /chat: render the prompt, call the provider once, and return
//! the completion text.

use crate::error::AppResult;
use crate::handlers::AppState;
use crate::handlers::extractor::ApiJson;
use crate::metrics::Outcome;
use crate::middleware::RequestId;
use crate::models;
use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Chat request from client
///
/// `question` is required; any string (including empty) is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

/// Chat response to client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /chat handler
///
/// Waits for the single provider call (bounded by
/// `server.request_timeout_seconds`). Every provider failure becomes a 500
/// with the error text as `detail`; nothing is retried.
pub async fn handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiJson(request): ApiJson<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    tracing::debug!(
        request_id = %request_id,
        question_length = request.question.len(),
        model = %state.model().model(),
        "Received chat request"
    );

    let started = Instant::now();
    let result = models::answer(state.model(), &request.question).await;
    let duration_ms = started.elapsed().as_secs_f64() * 1000.0;

    match result {
        Ok(text) => {
            state.metrics().record_chat(Outcome::Success, duration_ms);
            tracing::info!(
                request_id = %request_id,
                response_length = text.len(),
                duration_ms = %duration_ms,
                "Chat request completed"
            );
            Ok(Json(ChatResponse { response: text }))
        }
        Err(e) => {
            state
                .metrics()
                .record_chat(Outcome::UpstreamError, duration_ms);
            tracing::warn!(
                request_id = %request_id,
                error = %e,
                duration_ms = %duration_ms,
                "Chat request failed"
            );
            Err(e.into())
        }
    }
}
