//! Root status endpoint

use axum::{Json, extract::State};
use serde::Serialize;

use crate::handlers::AppState;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
}

/// GET / handler
///
/// Always 200 with the static greeting; never touches the provider.
pub async fn handler(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: state.greeting().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Credential, ProviderKind};

    #[tokio::test]
    async fn test_root_handler_returns_greeting() {
        let state = AppState::new(
            Config::for_provider(ProviderKind::Groq),
            Credential::new("gsk_test").unwrap(),
        )
        .unwrap();

        let Json(body) = handler(State(state.clone())).await;
        assert_eq!(body.message, state.greeting());
    }
}
