use recap_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("{0}")]
    Internal(String),
}

impl ApplicationError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::Domain(err) => err.error_type(),
            Self::Internal(_) => "InternalError",
        }
    }
}
