use thiserror::Error;

/// Error taxonomy shared by every pipeline stage. Each variant carries a
/// human-readable message; the transport layer derives HTTP statuses from
/// the variant, never from the message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Download(String),
    #[error("{0}")]
    Transcription(String),
    #[error("{0}")]
    Translation(String),
    #[error("{0}")]
    Summarization(String),
    #[error("{0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn download(message: impl Into<String>) -> Self {
        Self::Download(message.into())
    }

    pub fn transcription(message: impl Into<String>) -> Self {
        Self::Transcription(message.into())
    }

    pub fn translation(message: impl Into<String>) -> Self {
        Self::Translation(message.into())
    }

    pub fn summarization(message: impl Into<String>) -> Self {
        Self::Summarization(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Stable discriminant exposed in error payloads.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::Download(_) => "DownloadError",
            Self::Transcription(_) => "TranscriptionError",
            Self::Translation(_) => "TranslationError",
            Self::Summarization(_) => "SummarizationError",
            Self::Internal(_) => "InternalError",
        }
    }

    /// Whether the failure mode is externally caused and worth retrying.
    /// Validation and summarization failures are input-driven or local and
    /// deterministic, so a retry would observe the same outcome.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Download(_) | Self::Transcription(_) | Self::Translation(_)
        )
    }
}
