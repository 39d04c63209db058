use axum::{extract::State, http::StatusCode, response::Json};

use recap_application::{
    LanguagesResponse, SummarizeTextRequest, SummarizeTextResponse, TranslateTextRequest,
    TranslateTextResponse,
};

use crate::error::{error_mapper, HttpError};
use crate::{AppState, ValidatedJson};

pub async fn translate_text(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TranslateTextRequest>,
) -> Result<(StatusCode, Json<TranslateTextResponse>), HttpError> {
    tracing::info!(
        source_language = %request.source_language,
        target_language = %request.target_language,
        text_chars = request.text.chars().count(),
        "received translate request"
    );

    match state.text.translate(request).await {
        Ok(response) => Ok((StatusCode::OK, Json(response))),
        Err(error) => {
            tracing::error!(error = %error, "translate request failed");
            Err(error_mapper(error))
        }
    }
}

pub async fn summarize_text(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SummarizeTextRequest>,
) -> Result<(StatusCode, Json<SummarizeTextResponse>), HttpError> {
    tracing::info!(
        ratio = request.ratio,
        text_chars = request.text.chars().count(),
        "received summarize request"
    );

    match state.text.summarize(request).await {
        Ok(response) => Ok((StatusCode::OK, Json(response))),
        Err(error) => {
            tracing::error!(error = %error, "summarize request failed");
            Err(error_mapper(error))
        }
    }
}

pub async fn languages(State(state): State<AppState>) -> (StatusCode, Json<LanguagesResponse>) {
    (StatusCode::OK, Json(state.text.languages()))
}
