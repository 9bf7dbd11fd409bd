//! Prometheus metrics endpoint

use axum::{extract::State, http::StatusCode};

use crate::handlers::AppState;

/// GET /metrics handler
///
/// - `200 OK` with metrics in Prometheus text format
/// - `500 Internal Server Error` if encoding fails
pub async fn handler(State(state): State<AppState>) -> (StatusCode, String) {
    match state.metrics().gather() {
        Ok(output) => (StatusCode::OK, output),
        Err(e) => {
            tracing::error!(error = %e, "Failed to gather metrics for Prometheus scraping");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to gather metrics: {}", e),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Credential, ProviderKind};
    use crate::metrics::Outcome;

    #[tokio::test]
    async fn test_metrics_handler_returns_prometheus_format() {
        let state = AppState::new(
            Config::for_provider(ProviderKind::Groq),
            Credential::new("gsk_test").unwrap(),
        )
        .unwrap();
        state.metrics().record_chat(Outcome::UpstreamError, 3.0);

        let (status, body) = handler(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("chatrelay_chat_requests_total{outcome=\"upstream_error\"} 1"));
    }
}
