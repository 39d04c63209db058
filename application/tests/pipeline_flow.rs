use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use recap_application::{
    ProcessVideoRequest, RetryPolicy, RetrySchedule, SummarizeTextRequest, TextUseCase,
    TextUseCaseImpl, TranslateTextRequest, VideoUseCase, VideoUseCaseImpl,
};
use recap_application::{ApplicationError, PipelineRunner};
use recap_domain::{
    AudioArtifact, DomainError, DownloadPort, EmbeddingPort, ExtractiveSummarizer,
    TranscriptionPort, TranscriptionResult, TranslationPort, TranslationResult, VideoMetadata,
};

fn metadata() -> VideoMetadata {
    VideoMetadata {
        title: "A talk".to_string(),
        author: "Speaker".to_string(),
        duration: 600,
        views: 1000,
        thumbnail: String::new(),
        description: String::new(),
    }
}

fn transcript_text(sentence_count: usize) -> String {
    (1..=sentence_count)
        .map(|i| format!("Sentence number {i} carries enough words to matter."))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Default)]
struct MockDownload {
    fail_with: Option<String>,
    swept: AtomicBool,
    cleaned: AtomicU32,
}

#[async_trait]
impl DownloadPort for MockDownload {
    async fn download(
        &self,
        _video_url: &str,
        video_id: &str,
    ) -> Result<(AudioArtifact, VideoMetadata), DomainError> {
        if let Some(message) = &self.fail_with {
            return Err(DomainError::validation(message.clone()));
        }
        Ok((
            AudioArtifact::new(format!("/tmp/{video_id}.wav")),
            metadata(),
        ))
    }

    async fn cleanup(&self, _artifact: &AudioArtifact) {
        self.cleaned.fetch_add(1, Ordering::SeqCst);
    }

    async fn cleanup_all(&self) {
        self.swept.store(true, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct MockTranscription {
    called: AtomicBool,
    fail: bool,
}

#[async_trait]
impl TranscriptionPort for MockTranscription {
    async fn transcribe(
        &self,
        _audio_path: &Path,
        language_hint: &str,
    ) -> Result<TranscriptionResult, DomainError> {
        self.called.store(true, Ordering::SeqCst);
        if self.fail {
            return Err(DomainError::transcription("model failure"));
        }
        Ok(TranscriptionResult::new(
            transcript_text(20),
            language_hint.to_string(),
            None,
        ))
    }
}

#[derive(Default)]
struct MockTranslation {
    called: AtomicBool,
}

#[async_trait]
impl TranslationPort for MockTranslation {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<TranslationResult, DomainError> {
        self.called.store(true, Ordering::SeqCst);
        let translated = format!("[{target_language}] {text}");
        Ok(TranslationResult {
            original_text: text.to_string(),
            word_count: translated.split_whitespace().count(),
            translated_text: translated,
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        })
    }

    fn supported_languages(&self) -> BTreeMap<String, String> {
        BTreeMap::from([("es".to_string(), "spanish".to_string())])
    }
}

struct StubEmbedding;

#[async_trait]
impl EmbeddingPort for StubEmbedding {
    async fn embed(&self, sentence: &str) -> Result<Vec<f32>, DomainError> {
        let char_sum: u32 = sentence.chars().map(|c| c as u32 % 89).sum();
        Ok(vec![1.0, sentence.len() as f32 / 10.0, char_sum as f32 / 50.0])
    }
}

fn fast_retries() -> RetrySchedule {
    RetrySchedule {
        download: RetryPolicy::new(1, Duration::from_millis(1)),
        transcribe: RetryPolicy::new(1, Duration::from_millis(1)),
        translate: RetryPolicy::new(1, Duration::from_millis(1)),
    }
}

struct Fixture {
    download: Arc<MockDownload>,
    transcription: Arc<MockTranscription>,
    translation: Arc<MockTranslation>,
    video: VideoUseCaseImpl,
}

fn fixture(download: MockDownload, transcription: MockTranscription) -> Fixture {
    let download = Arc::new(download);
    let transcription = Arc::new(transcription);
    let translation = Arc::new(MockTranslation::default());
    let summarizer = Arc::new(ExtractiveSummarizer::new(Arc::new(StubEmbedding)));
    let runner = PipelineRunner::new(
        download.clone(),
        transcription.clone(),
        translation.clone(),
        summarizer,
        fast_retries(),
    );
    Fixture {
        download,
        transcription,
        translation,
        video: VideoUseCaseImpl::new(runner),
    }
}

fn process_request(ratio: f64, target: Option<&str>, include: bool) -> ProcessVideoRequest {
    ProcessVideoRequest {
        video_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
        source_language: "en".to_string(),
        target_language: target.map(str::to_string),
        summary_ratio: ratio,
        include_translation: include,
    }
}

#[tokio::test]
async fn full_pipeline_produces_summary_in_document_order() {
    let f = fixture(MockDownload::default(), MockTranscription::default());
    let response = f
        .video
        .process(process_request(0.3, None, false))
        .await
        .expect("pipeline succeeds");

    assert!(response.success);
    assert_eq!(response.video_id, "dQw4w9WgXcQ");
    assert_eq!(response.transcription.word_count, 20 * 8);
    assert!(response.translation.is_none());
    assert!(response.summary.compression_percentage > 0.0);
    // consumed artifact was released, no error sweep happened
    assert_eq!(f.download.cleaned.load(Ordering::SeqCst), 1);
    assert!(!f.download.swept.load(Ordering::SeqCst));
}

#[tokio::test]
async fn translation_runs_only_when_requested_and_different() {
    let f = fixture(MockDownload::default(), MockTranscription::default());
    let response = f
        .video
        .process(process_request(0.3, Some("es"), true))
        .await
        .unwrap();
    let translation = response.translation.expect("translation present");
    assert_eq!(translation.target_language, "es");
    assert!(f.translation.called.load(Ordering::SeqCst));
    assert!(!response.summary.text.is_empty());

    let f = fixture(MockDownload::default(), MockTranscription::default());
    let response = f
        .video
        .process(process_request(0.3, Some("en"), true))
        .await
        .unwrap();
    assert!(response.translation.is_none());
    assert!(!f.translation.called.load(Ordering::SeqCst));
}

#[tokio::test]
async fn duration_ceiling_rejects_before_transcription() {
    let download = MockDownload {
        fail_with: Some("Video duration (8000s) exceeds maximum allowed (7200s)".to_string()),
        ..MockDownload::default()
    };
    let f = fixture(download, MockTranscription::default());
    let err = f
        .video
        .process(process_request(0.3, None, false))
        .await
        .unwrap_err();

    // the ceiling violation is an input error: fatal, never retried
    match err {
        ApplicationError::Domain(domain) => {
            assert_eq!(domain.error_type(), "ValidationError");
            assert!(!domain.is_transient());
            assert!(domain.to_string().contains("8000"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!f.transcription.called.load(Ordering::SeqCst));
    assert!(f.download.swept.load(Ordering::SeqCst));
}

#[tokio::test]
async fn stage_failure_triggers_directory_sweep() {
    let f = fixture(
        MockDownload::default(),
        MockTranscription {
            fail: true,
            ..MockTranscription::default()
        },
    );
    let err = f
        .video
        .process(process_request(0.3, None, false))
        .await
        .unwrap_err();
    assert_eq!(err.error_type(), "TranscriptionError");
    assert!(f.download.swept.load(Ordering::SeqCst));
}

#[tokio::test]
async fn out_of_range_ratios_are_rejected_before_any_stage() {
    for ratio in [0.05, 0.6] {
        let f = fixture(MockDownload::default(), MockTranscription::default());
        let err = f
            .video
            .process(process_request(ratio, None, false))
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), "ValidationError", "ratio {ratio}");
        assert!(!f.transcription.called.load(Ordering::SeqCst));
        assert!(!f.download.swept.load(Ordering::SeqCst));
    }
}

#[tokio::test]
async fn invalid_url_and_language_are_validation_errors() {
    let f = fixture(MockDownload::default(), MockTranscription::default());
    let mut request = process_request(0.3, None, false);
    request.video_url = "https://example.com/clip".to_string();
    assert_eq!(
        f.video.process(request).await.unwrap_err().error_type(),
        "ValidationError"
    );

    let mut request = process_request(0.3, None, false);
    request.source_language = "xx".to_string();
    assert_eq!(
        f.video.process(request).await.unwrap_err().error_type(),
        "ValidationError"
    );
}

#[tokio::test]
async fn transcribe_only_flow_returns_metadata_and_transcript() {
    let f = fixture(MockDownload::default(), MockTranscription::default());
    let response = f
        .video
        .transcribe(recap_application::TranscribeVideoRequest {
            video_url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
            source_language: "en".to_string(),
        })
        .await
        .unwrap();
    assert!(response.success);
    assert_eq!(response.metadata.duration, 600);
    assert_eq!(response.transcription.language, "en");
    assert_eq!(f.download.cleaned.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn translate_usecase_returns_target_language_text() {
    let text_usecase = TextUseCaseImpl::new(
        Arc::new(MockTranslation::default()),
        Arc::new(ExtractiveSummarizer::new(Arc::new(StubEmbedding))),
        RetryPolicy::new(1, Duration::from_millis(1)),
    );
    let response = text_usecase
        .translate(TranslateTextRequest {
            text: "Hello, how are you?".to_string(),
            source_language: "en".to_string(),
            target_language: "es".to_string(),
        })
        .await
        .unwrap();
    assert!(!response.translation.translated_text.is_empty());
    assert_eq!(response.translation.target_language, "es");
}

#[tokio::test]
async fn summarize_usecase_validates_ratio_and_text() {
    let text_usecase = TextUseCaseImpl::new(
        Arc::new(MockTranslation::default()),
        Arc::new(ExtractiveSummarizer::new(Arc::new(StubEmbedding))),
        RetryPolicy::new(1, Duration::from_millis(1)),
    );

    let err = text_usecase
        .summarize(SummarizeTextRequest {
            text: "  ".to_string(),
            ratio: 0.3,
        })
        .await
        .unwrap_err();
    assert_eq!(err.error_type(), "ValidationError");

    let err = text_usecase
        .summarize(SummarizeTextRequest {
            text: transcript_text(5),
            ratio: 0.6,
        })
        .await
        .unwrap_err();
    assert_eq!(err.error_type(), "ValidationError");

    let ok = text_usecase
        .summarize(SummarizeTextRequest {
            text: transcript_text(20),
            ratio: 0.3,
        })
        .await
        .unwrap();
    assert_eq!(ok.summary.summary_sentences, 6);
}

#[tokio::test]
async fn languages_listing_combines_both_capabilities() {
    let text_usecase = TextUseCaseImpl::new(
        Arc::new(MockTranslation::default()),
        Arc::new(ExtractiveSummarizer::new(Arc::new(StubEmbedding))),
        RetryPolicy::new(1, Duration::from_millis(1)),
    );
    let response = text_usecase.languages();
    assert!(response.success);
    assert!(response
        .languages
        .transcription
        .contains(&"en".to_string()));
    assert_eq!(
        response.languages.translation.get("es"),
        Some(&"spanish".to_string())
    );
}
