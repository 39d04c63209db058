use std::sync::Arc;

use recap_application::{TextUseCase, VideoUseCase};

#[derive(Clone)]
pub struct AppState {
    pub video: Arc<dyn VideoUseCase>,
    pub text: Arc<dyn TextUseCase>,
}

impl AppState {
    pub fn new(video: Arc<dyn VideoUseCase>, text: Arc<dyn TextUseCase>) -> Self {
        Self { video, text }
    }
}
