use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use recap_domain::{
    DownloadPort, ExtractiveSummarizer, PipelineRequest, SummarizeOptions, SummaryResult,
    TranscriptionPort, TranscriptionResult, TranslationPort, TranslationResult, VideoMetadata,
};
use recap_domain::DomainError;

use crate::RetryPolicy;

/// Discrete pipeline stage, used to tag failures in logs. Transitions are
/// strictly forward; retries live inside the per-stage policies, never at
/// this level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Download,
    Transcribe,
    Translate,
    Summarize,
}

impl PipelineStage {
    pub fn label(self) -> &'static str {
        match self {
            Self::Download => "download",
            Self::Transcribe => "transcribe",
            Self::Translate => "translate",
            Self::Summarize => "summarize",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-stage retry policies. Embedding/summarization is local and
/// deterministic, so it carries no policy.
#[derive(Debug, Clone)]
pub struct RetrySchedule {
    pub download: RetryPolicy,
    pub transcribe: RetryPolicy,
    pub translate: RetryPolicy,
}

impl Default for RetrySchedule {
    fn default() -> Self {
        Self {
            download: RetryPolicy::new(3, Duration::from_secs(2)),
            transcribe: RetryPolicy::new(2, Duration::from_secs(3)),
            translate: RetryPolicy::new(3, Duration::from_secs(1)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub video_id: String,
    pub metadata: VideoMetadata,
    pub transcription: TranscriptionResult,
    pub translation: Option<TranslationResult>,
    pub summary: SummaryResult,
}

#[derive(Debug, Clone)]
pub struct TranscriptionOutcome {
    pub video_id: String,
    pub metadata: VideoMetadata,
    pub transcription: TranscriptionResult,
}

/// Sequences Download -> Transcribe -> [Translate] -> Summarize for one
/// request at a time. Owns artifact cleanup: the consumed audio file is
/// removed on the success path, and any stage failure triggers a coarse
/// sweep of the working directories before the error is re-raised
/// unchanged in kind.
pub struct PipelineRunner {
    download: Arc<dyn DownloadPort>,
    transcription: Arc<dyn TranscriptionPort>,
    translation: Arc<dyn TranslationPort>,
    summarizer: Arc<ExtractiveSummarizer>,
    retries: RetrySchedule,
}

impl PipelineRunner {
    pub fn new(
        download: Arc<dyn DownloadPort>,
        transcription: Arc<dyn TranscriptionPort>,
        translation: Arc<dyn TranslationPort>,
        summarizer: Arc<ExtractiveSummarizer>,
        retries: RetrySchedule,
    ) -> Self {
        Self {
            download,
            transcription,
            translation,
            summarizer,
            retries,
        }
    }

    pub async fn run(&self, request: PipelineRequest) -> Result<PipelineOutcome, DomainError> {
        match self.execute(&request).await {
            Ok(outcome) => Ok(outcome),
            Err((stage, err)) => {
                tracing::error!(
                    stage = %stage,
                    video_id = %request.video_id,
                    error = %err,
                    "pipeline stage failed, sweeping working directories"
                );
                self.download.cleanup_all().await;
                Err(err)
            }
        }
    }

    /// Download + transcribe only, with the same cleanup guarantee.
    pub async fn run_transcription(
        &self,
        request: PipelineRequest,
    ) -> Result<TranscriptionOutcome, DomainError> {
        let result = async {
            let (artifact, metadata) = self.download_stage(&request).await?;
            let transcription = self.transcribe_stage(&request, &artifact).await?;
            self.download.cleanup(&artifact).await;
            Ok((metadata, transcription))
        }
        .await;

        match result {
            Ok((metadata, transcription)) => Ok(TranscriptionOutcome {
                video_id: request.video_id,
                metadata,
                transcription,
            }),
            Err((stage, err)) => {
                tracing::error!(stage = %stage, error = %err, "transcription pipeline failed");
                self.download.cleanup_all().await;
                Err(err)
            }
        }
    }

    async fn execute(
        &self,
        request: &PipelineRequest,
    ) -> Result<PipelineOutcome, (PipelineStage, DomainError)> {
        tracing::info!(video_id = %request.video_id, "step 1: downloading and extracting audio");
        let (artifact, metadata) = self.download_stage(request).await?;

        tracing::info!(video_id = %request.video_id, "step 2: transcribing audio");
        let transcription = self.transcribe_stage(request, &artifact).await?;
        self.download.cleanup(&artifact).await;

        let translation = if wants_translation(request) {
            let target = request.target_language.as_deref().unwrap_or_default();
            tracing::info!(video_id = %request.video_id, target, "step 3: translating transcript");
            Some(self.translate_stage(request, &transcription.text).await?)
        } else {
            tracing::debug!(video_id = %request.video_id, "translation skipped");
            None
        };

        let text_to_summarize = translation
            .as_ref()
            .map(|t| t.translated_text.clone())
            .unwrap_or_else(|| transcription.text.clone());

        tracing::info!(video_id = %request.video_id, "step 4: generating summary");
        let summary = self
            .summarizer
            .summarize(
                &text_to_summarize,
                &SummarizeOptions::with_ratio(request.summary_ratio),
            )
            .await
            .map_err(|err| (PipelineStage::Summarize, err))?;

        Ok(PipelineOutcome {
            video_id: request.video_id.clone(),
            metadata,
            transcription,
            translation,
            summary,
        })
    }

    async fn download_stage(
        &self,
        request: &PipelineRequest,
    ) -> Result<(recap_domain::AudioArtifact, VideoMetadata), (PipelineStage, DomainError)> {
        let port = Arc::clone(&self.download);
        let url = request.video_url.clone();
        let id = request.video_id.clone();
        self.retries
            .download
            .run("download", || {
                let port = Arc::clone(&port);
                let url = url.clone();
                let id = id.clone();
                async move { port.download(&url, &id).await }
            })
            .await
            .map_err(|err| (PipelineStage::Download, err))
    }

    async fn transcribe_stage(
        &self,
        request: &PipelineRequest,
        artifact: &recap_domain::AudioArtifact,
    ) -> Result<TranscriptionResult, (PipelineStage, DomainError)> {
        let port = Arc::clone(&self.transcription);
        let path = artifact.path().to_path_buf();
        let language = request.source_language.clone();
        self.retries
            .transcribe
            .run("transcribe", || {
                let port = Arc::clone(&port);
                let path = path.clone();
                let language = language.clone();
                async move { port.transcribe(&path, &language).await }
            })
            .await
            .map_err(|err| (PipelineStage::Transcribe, err))
    }

    async fn translate_stage(
        &self,
        request: &PipelineRequest,
        text: &str,
    ) -> Result<TranslationResult, (PipelineStage, DomainError)> {
        let port = Arc::clone(&self.translation);
        let text = text.to_string();
        let source = request.source_language.clone();
        let target = request
            .target_language
            .clone()
            .unwrap_or_else(|| "en".to_string());
        self.retries
            .translate
            .run("translate", || {
                let port = Arc::clone(&port);
                let text = text.clone();
                let source = source.clone();
                let target = target.clone();
                async move { port.translate(&text, &source, &target).await }
            })
            .await
            .map_err(|err| (PipelineStage::Translate, err))
    }
}

/// Translation runs only when explicitly requested, a target is present,
/// and the target differs from the source.
fn wants_translation(request: &PipelineRequest) -> bool {
    request.include_translation
        && request
            .target_language
            .as_deref()
            .is_some_and(|target| target != request.source_language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recap_domain::PipelineRequest;

    fn request(include: bool, target: Option<&str>) -> PipelineRequest {
        PipelineRequest {
            video_url: "https://youtu.be/abc123".to_string(),
            video_id: "abc123".to_string(),
            source_language: "en".to_string(),
            target_language: target.map(str::to_string),
            summary_ratio: 0.3,
            include_translation: include,
        }
    }

    #[test]
    fn translation_requires_flag_target_and_difference() {
        assert!(wants_translation(&request(true, Some("es"))));
        assert!(!wants_translation(&request(false, Some("es"))));
        assert!(!wants_translation(&request(true, None)));
        assert!(!wants_translation(&request(true, Some("en"))));
    }
}
