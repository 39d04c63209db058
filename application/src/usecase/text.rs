use std::sync::Arc;

use async_trait::async_trait;

use recap_domain::{language, ExtractiveSummarizer, SummarizeOptions, TranslationPort};

use crate::{
    validate, ApplicationError, LanguagesBlock, LanguagesResponse, RetryPolicy,
    SummarizeTextRequest, SummarizeTextResponse, TranslateTextRequest, TranslateTextResponse,
};

#[async_trait]
pub trait TextUseCase: Send + Sync {
    async fn translate(
        &self,
        request: TranslateTextRequest,
    ) -> Result<TranslateTextResponse, ApplicationError>;

    async fn summarize(
        &self,
        request: SummarizeTextRequest,
    ) -> Result<SummarizeTextResponse, ApplicationError>;

    fn languages(&self) -> LanguagesResponse;
}

pub struct TextUseCaseImpl {
    translation: Arc<dyn TranslationPort>,
    summarizer: Arc<ExtractiveSummarizer>,
    translate_retry: RetryPolicy,
}

impl TextUseCaseImpl {
    pub fn new(
        translation: Arc<dyn TranslationPort>,
        summarizer: Arc<ExtractiveSummarizer>,
        translate_retry: RetryPolicy,
    ) -> Self {
        Self {
            translation,
            summarizer,
            translate_retry,
        }
    }
}

#[async_trait]
impl TextUseCase for TextUseCaseImpl {
    async fn translate(
        &self,
        request: TranslateTextRequest,
    ) -> Result<TranslateTextResponse, ApplicationError> {
        if request.text.trim().is_empty() {
            return Err(ApplicationError::validation("Text is required"));
        }
        if request.target_language.trim().is_empty() {
            return Err(ApplicationError::validation("Target language is required"));
        }

        let port = Arc::clone(&self.translation);
        let text = request.text.clone();
        let source = request.source_language.to_ascii_lowercase();
        let target = request.target_language.to_ascii_lowercase();

        let translation = self
            .translate_retry
            .run("translate", || {
                let port = Arc::clone(&port);
                let text = text.clone();
                let source = source.clone();
                let target = target.clone();
                async move { port.translate(&text, &source, &target).await }
            })
            .await?;

        tracing::info!(
            word_count = translation.word_count,
            target = %translation.target_language,
            "translation complete"
        );
        Ok(TranslateTextResponse {
            success: true,
            translation,
        })
    }

    async fn summarize(
        &self,
        request: SummarizeTextRequest,
    ) -> Result<SummarizeTextResponse, ApplicationError> {
        if request.text.trim().is_empty() {
            return Err(ApplicationError::validation("Text is required"));
        }
        validate::validate_summary_ratio(request.ratio)?;

        let summary = self
            .summarizer
            .summarize(&request.text, &SummarizeOptions::with_ratio(request.ratio))
            .await?;

        tracing::info!(
            compression = summary.compression_percentage,
            "summarization complete"
        );
        Ok(SummarizeTextResponse {
            success: true,
            summary,
        })
    }

    fn languages(&self) -> LanguagesResponse {
        LanguagesResponse {
            success: true,
            languages: LanguagesBlock {
                transcription: language::supported_codes()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                translation: self.translation.supported_languages(),
            },
        }
    }
}
