use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Error};
use recap_application::{
    PipelineRunner, RetryPolicy, RetrySchedule, TextUseCase, TextUseCaseImpl, VideoUseCase,
    VideoUseCaseImpl,
};
use recap_configuration::{AppConfig, RetryStageConfig, ServerConfig};
use recap_domain::{
    DownloadPort, EmbeddingPort, ExtractiveSummarizer, TranscriptionPort, TranslationPort,
};
use recap_http_server::{build_router, AppState};
use recap_infra::{
    DownloadAdapterConfig, GoogleTranslateAdapter, HashedNgramEmbeddingAdapter,
    TranslateAdapterConfig, WhisperAdapterConfig, WhisperTranscriptionAdapter,
    YtDlpDownloadAdapter,
};

pub async fn build_and_run(config: AppConfig, server_config: ServerConfig) -> Result<(), Error> {
    let app = Application::new(config)?;
    app.run(server_config).await
}

pub struct Application {
    pub config: AppConfig,
    pub state: AppState,
}

impl Application {
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        #[cfg(feature = "whisper-runtime")]
        tracing::info!("whisper runtime feature enabled");
        #[cfg(feature = "whisper-cuda")]
        tracing::info!("whisper backend: CUDA");
        #[cfg(feature = "whisper-vulkan")]
        tracing::info!("whisper backend: Vulkan");
        #[cfg(all(
            feature = "whisper-runtime",
            not(feature = "whisper-cuda"),
            not(feature = "whisper-vulkan")
        ))]
        tracing::info!("whisper backend: CPU");

        tracing::info!(
            model_path = %config.service.transcription.model_path,
            max_duration_secs = config.service.download.max_duration_secs,
            "initializing application"
        );

        let download: Arc<dyn DownloadPort> =
            Arc::new(YtDlpDownloadAdapter::new(DownloadAdapterConfig {
                audio_dir: PathBuf::from(&config.service.download.audio_dir),
                video_dir: PathBuf::from(&config.service.download.video_dir),
                max_duration_secs: config.service.download.max_duration_secs,
            })?);
        let transcription: Arc<dyn TranscriptionPort> =
            Arc::new(WhisperTranscriptionAdapter::new(WhisperAdapterConfig {
                model_path: config.service.transcription.model_path.clone(),
                model_size: config.service.transcription.model_size.clone(),
                default_language: config.service.transcription.default_language.clone(),
            }));
        let translation: Arc<dyn TranslationPort> =
            Arc::new(GoogleTranslateAdapter::new(TranslateAdapterConfig {
                endpoint: config.service.translation.endpoint.clone(),
                chunk_max_chars: config.service.translation.chunk_max_chars,
            }));
        let embeddings: Arc<dyn EmbeddingPort> = Arc::new(HashedNgramEmbeddingAdapter::new());
        let summarizer = Arc::new(
            ExtractiveSummarizer::new(embeddings)
                .with_min_sentence_chars(config.service.summary.min_sentence_chars)
                .with_min_sentences(config.service.summary.min_sentences),
        );

        let retries = RetrySchedule {
            download: retry_policy(&config.service.retry.download),
            transcribe: retry_policy(&config.service.retry.transcribe),
            translate: retry_policy(&config.service.retry.translate),
        };
        let translate_retry = retries.translate.clone();

        let runner = PipelineRunner::new(
            download,
            transcription,
            Arc::clone(&translation),
            Arc::clone(&summarizer),
            retries,
        );
        let video: Arc<dyn VideoUseCase> = Arc::new(VideoUseCaseImpl::new(runner));
        let text: Arc<dyn TextUseCase> =
            Arc::new(TextUseCaseImpl::new(translation, summarizer, translate_retry));

        Ok(Self {
            config,
            state: AppState::new(video, text),
        })
    }

    pub async fn run(self, server_config: ServerConfig) -> Result<(), Error> {
        let addr = format!("{}:{}", server_config.host, server_config.port);
        tracing::info!(%addr, "starting http server");

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|err| anyhow!("failed to bind {addr}: {err}"))?;
        axum::serve(listener, build_router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|err| anyhow!("http server failed: {err}"))
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}

fn retry_policy(stage: &RetryStageConfig) -> RetryPolicy {
    RetryPolicy::new(stage.attempts, Duration::from_millis(stage.delay_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_wires_from_default_config() {
        let mut config = AppConfig::default();
        let dir = std::env::temp_dir().join("recap-setup-test");
        config.service.download.audio_dir = dir.join("audio").display().to_string();
        config.service.download.video_dir = dir.join("video").display().to_string();

        let app = Application::new(config).expect("wiring succeeds");
        assert_eq!(app.config.server.port, 8080);
    }
}
