use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use recap_application::ApplicationError;
use recap_domain::DomainError;

/// Wire-level error: `{success:false, error, error_type}` with a status
/// derived from the error classification. This is the only place domain
/// failures become HTTP statuses.
#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub error_type: &'static str,
    pub message: String,
}

impl HttpError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error_type: "ValidationError",
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error_type: "NotFound",
            message: "The requested endpoint does not exist".to_string(),
        }
    }

    fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error_type: "InternalError",
            message: "An unexpected error occurred. Please try again.".to_string(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "success": false,
                "error": self.message,
                "error_type": self.error_type,
            })),
        )
            .into_response()
    }
}

pub fn error_mapper(error: ApplicationError) -> HttpError {
    let error_type = error.error_type();
    match &error {
        ApplicationError::Validation(message) => HttpError::validation(message.clone()),
        ApplicationError::Domain(domain) => match domain {
            DomainError::Validation(message) | DomainError::Summarization(message) => HttpError {
                status: StatusCode::BAD_REQUEST,
                error_type,
                message: message.clone(),
            },
            DomainError::Download(message)
            | DomainError::Transcription(message)
            | DomainError::Translation(message) => HttpError {
                status: StatusCode::BAD_GATEWAY,
                error_type,
                message: message.clone(),
            },
            DomainError::Internal(_) => HttpError::internal(),
        },
        ApplicationError::Internal(_) => HttpError::internal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request_with_message() {
        let err = error_mapper(ApplicationError::validation("Summary ratio must be between"));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error_type, "ValidationError");
        assert!(err.message.contains("ratio"));
    }

    #[test]
    fn transient_stage_errors_map_to_bad_gateway() {
        for domain in [
            DomainError::download("net"),
            DomainError::transcription("model"),
            DomainError::translation("provider"),
        ] {
            let err = error_mapper(ApplicationError::Domain(domain));
            assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        }
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = error_mapper(ApplicationError::Internal("secret stack trace".to_string()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message.contains("secret"));
    }

    #[test]
    fn summarization_errors_are_client_class() {
        let err = error_mapper(ApplicationError::Domain(DomainError::summarization(
            "Text cannot be empty",
        )));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error_type, "SummarizationError");
    }
}
