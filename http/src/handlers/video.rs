use axum::{extract::State, http::StatusCode, response::Json};

use recap_application::{
    ProcessVideoRequest, ProcessVideoResponse, TranscribeVideoRequest, TranscribeVideoResponse,
};

use crate::error::{error_mapper, HttpError};
use crate::{AppState, ValidatedJson};

pub async fn process_video(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ProcessVideoRequest>,
) -> Result<(StatusCode, Json<ProcessVideoResponse>), HttpError> {
    tracing::info!(
        video_url = %request.video_url,
        source_language = %request.source_language,
        target_language = request.target_language.as_deref().unwrap_or("-"),
        summary_ratio = request.summary_ratio,
        include_translation = request.include_translation,
        "received process request"
    );

    match state.video.process(request).await {
        Ok(response) => {
            tracing::info!(video_id = %response.video_id, "process request completed");
            Ok((StatusCode::OK, Json(response)))
        }
        Err(error) => {
            tracing::error!(error = %error, "process request failed");
            Err(error_mapper(error))
        }
    }
}

pub async fn transcribe_video(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TranscribeVideoRequest>,
) -> Result<(StatusCode, Json<TranscribeVideoResponse>), HttpError> {
    tracing::info!(
        video_url = %request.video_url,
        source_language = %request.source_language,
        "received transcribe request"
    );

    match state.video.transcribe(request).await {
        Ok(response) => {
            tracing::info!(
                video_id = %response.video_id,
                word_count = response.transcription.word_count,
                "transcribe request completed"
            );
            Ok((StatusCode::OK, Json(response)))
        }
        Err(error) => {
            tracing::error!(error = %error, "transcribe request failed");
            Err(error_mapper(error))
        }
    }
}
