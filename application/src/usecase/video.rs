use async_trait::async_trait;
use uuid::Uuid;

use recap_domain::PipelineRequest;

use crate::{
    validate, ApplicationError, PipelineOutcome, PipelineRunner, ProcessVideoRequest,
    ProcessVideoResponse, SummaryBlock, TranscribeVideoRequest, TranscribeVideoResponse,
    TranscriptionBlock, TranslationBlock,
};

#[async_trait]
pub trait VideoUseCase: Send + Sync {
    async fn process(
        &self,
        request: ProcessVideoRequest,
    ) -> Result<ProcessVideoResponse, ApplicationError>;

    async fn transcribe(
        &self,
        request: TranscribeVideoRequest,
    ) -> Result<TranscribeVideoResponse, ApplicationError>;
}

pub struct VideoUseCaseImpl {
    pipeline: PipelineRunner,
}

impl VideoUseCaseImpl {
    pub fn new(pipeline: PipelineRunner) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl VideoUseCase for VideoUseCaseImpl {
    async fn process(
        &self,
        request: ProcessVideoRequest,
    ) -> Result<ProcessVideoResponse, ApplicationError> {
        let video_id = validate::extract_video_id(&request.video_url)?;
        validate::validate_language_code(&request.source_language)?;
        if let Some(target) = &request.target_language {
            validate::validate_language_code(target)?;
        }
        validate::validate_summary_ratio(request.summary_ratio)?;

        let request_id = Uuid::new_v4();
        tracing::info!(%request_id, %video_id, "processing video");

        let outcome = self
            .pipeline
            .run(PipelineRequest {
                video_url: request.video_url,
                video_id: video_id.clone(),
                source_language: request.source_language.to_ascii_lowercase(),
                target_language: request
                    .target_language
                    .map(|code| code.to_ascii_lowercase()),
                summary_ratio: request.summary_ratio,
                include_translation: request.include_translation,
            })
            .await?;

        tracing::info!(%request_id, %video_id, "processing complete");
        Ok(into_process_response(outcome))
    }

    async fn transcribe(
        &self,
        request: TranscribeVideoRequest,
    ) -> Result<TranscribeVideoResponse, ApplicationError> {
        let video_id = validate::extract_video_id(&request.video_url)?;
        validate::validate_language_code(&request.source_language)?;

        tracing::info!(%video_id, "transcribing video");
        let outcome = self
            .pipeline
            .run_transcription(PipelineRequest {
                video_url: request.video_url,
                video_id,
                source_language: request.source_language.to_ascii_lowercase(),
                target_language: None,
                summary_ratio: 0.3,
                include_translation: false,
            })
            .await?;

        Ok(TranscribeVideoResponse {
            success: true,
            video_id: outcome.video_id,
            metadata: outcome.metadata,
            transcription: outcome.transcription,
        })
    }
}

fn into_process_response(outcome: PipelineOutcome) -> ProcessVideoResponse {
    ProcessVideoResponse {
        success: true,
        video_id: outcome.video_id,
        metadata: outcome.metadata,
        transcription: TranscriptionBlock {
            text: outcome.transcription.text,
            language: outcome.transcription.language,
            word_count: outcome.transcription.word_count,
        },
        summary: SummaryBlock {
            text: outcome.summary.summary,
            original_length: outcome.summary.original_length,
            summary_length: outcome.summary.summary_length,
            reduction_ratio: outcome.summary.reduction_ratio,
            compression_percentage: outcome.summary.compression_percentage,
        },
        translation: outcome.translation.map(|t| TranslationBlock {
            text: t.translated_text,
            source_language: t.source_language,
            target_language: t.target_language,
            word_count: t.word_count,
        }),
    }
}
