use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::HttpError;

/// JSON extractor that runs `validator` rules before the handler sees the
/// payload. Rejections are the same wire shape as every other error.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| HttpError::validation(rejection.body_text()))?;
        value
            .validate()
            .map_err(|errors| HttpError::validation(flatten_errors(&errors)))?;
        Ok(ValidatedJson(value))
    }
}

fn flatten_errors(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, field_errors)| {
            let detail = field_errors
                .iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .collect::<Vec<_>>()
                .join(", ");
            if detail.is_empty() {
                format!("{field} is invalid")
            } else {
                format!("{field}: {detail}")
            }
        })
        .collect();
    parts.sort();
    parts.join("; ")
}
