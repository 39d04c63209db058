use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, text, video};
use crate::{AppState, HttpError};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api", get(health::health))
        .route("/api/process", post(video::process_video))
        .route("/api/transcribe", post(video::transcribe_video))
        .route("/api/translate", post(text::translate_text))
        .route("/api/summarize", post(text::summarize_text))
        .route("/api/languages", get(text::languages))
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> HttpError {
    HttpError::not_found()
}
