pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::export::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Export API
        .route(
            "/api/v1/export/profile",
            post(handlers::handle_export_profile),
        )
        .route("/api/v1/export/layout", post(handlers::handle_export_layout))
        .fallback(not_found)
        .with_state(state)
}
