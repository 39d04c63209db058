pub mod dto;
pub mod error;
pub mod pipeline;
pub mod retry;
pub mod usecase;
pub mod validate;

pub use dto::*;
pub use error::ApplicationError;
pub use pipeline::{
    PipelineOutcome, PipelineRunner, PipelineStage, RetrySchedule, TranscriptionOutcome,
};
pub use retry::RetryPolicy;
pub use usecase::{TextUseCase, TextUseCaseImpl, VideoUseCase, VideoUseCaseImpl};
