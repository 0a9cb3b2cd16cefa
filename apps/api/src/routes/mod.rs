pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analysis/career", post(handlers::handle_career))
        .route("/api/v1/analysis/riasec", post(handlers::handle_riasec))
        .route(
            "/api/v1/analysis/learning-path",
            post(handlers::handle_learning_path),
        )
        .route("/api/v1/analysis/chat", post(handlers::handle_chat))
        .with_state(state)
}
