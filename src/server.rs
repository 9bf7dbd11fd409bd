//! Router assembly
//!
//! Routes:
//! - `GET /`: status greeting
//! - `POST /chat`: single-turn chat
//! - `GET /metrics`: Prometheus exposition
//!
//! Anything else is a JSON 404.

use crate::error::AppError;
use crate::handlers::{self, AppState};
use crate::middleware::request_id_middleware;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the application router
///
/// The permissive CORS layer (any origin mirrored, any method and header,
/// credentials allowed) is installed only when the config enables it.
pub fn build_router(state: AppState) -> Router {
    let permissive_cors = state.config().permissive_cors();

    let router = Router::new()
        .route("/", get(handlers::root::handler))
        .route("/chat", post(handlers::chat::handler))
        .route("/metrics", get(handlers::metrics::handler))
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http());

    if permissive_cors {
        tracing::debug!("Permissive CORS enabled");
        router.layer(CorsLayer::very_permissive())
    } else {
        router
    }
}

async fn not_found() -> AppError {
    AppError::NotFound("Not Found".to_string())
}
