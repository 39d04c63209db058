mod text;
mod video;

pub use text::{TextUseCase, TextUseCaseImpl};
pub use video::{VideoUseCase, VideoUseCaseImpl};
