use axum::{http::StatusCode, response::Json};
use serde_json::{json, Value};

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Video Summarizer API",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "process": "/api/process",
                "transcribe": "/api/transcribe",
                "translate": "/api/translate",
                "summarize": "/api/summarize",
                "languages": "/api/languages",
            },
        })),
    )
}
