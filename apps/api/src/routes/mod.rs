pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::code_check::handlers::handle_validate_code;
use crate::errors::AppError;
use crate::lesson::handlers::handle_parse_lesson;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Lesson directive protocol
        .route("/api/v1/lessons/parse", post(handle_parse_lesson))
        // Code completeness checks
        .route("/api/v1/code/validate", post(handle_validate_code))
        .fallback(not_found)
        .with_state(state)
}
