use std::path::Path;

use async_trait::async_trait;

use recap_domain::{language, DomainError, TranscriptionPort, TranscriptionResult};

#[cfg(feature = "whisper-runtime")]
use recap_domain::TranscriptSegment;
#[cfg(feature = "whisper-runtime")]
use std::sync::Mutex;
#[cfg(feature = "whisper-runtime")]
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

#[derive(Debug, Clone)]
pub struct WhisperAdapterConfig {
    pub model_path: String,
    pub model_size: String,
    pub default_language: String,
}

/// Speech-to-text through whisper.cpp. The model context is loaded on
/// first use behind a mutex, so concurrent first callers serialize on a
/// single initialization instead of racing. Without the `whisper-runtime`
/// feature the adapter degrades to fallback text so the service still
/// starts on machines without the model runtime.
pub struct WhisperTranscriptionAdapter {
    config: WhisperAdapterConfig,
    #[cfg(feature = "whisper-runtime")]
    runtime: Mutex<Option<WhisperContext>>,
}

impl WhisperTranscriptionAdapter {
    pub fn new(config: WhisperAdapterConfig) -> Self {
        #[cfg(not(feature = "whisper-runtime"))]
        tracing::warn!(
            "compiled without `whisper-runtime`; transcription will return fallback text"
        );
        Self {
            config,
            #[cfg(feature = "whisper-runtime")]
            runtime: Mutex::new(None),
        }
    }
}

/// An unsupported hint degrades to automatic detection rather than failing.
fn resolve_decode_language(hint: &str) -> Option<String> {
    let normalized = hint.trim().to_ascii_lowercase();
    if normalized.is_empty() || normalized == "auto" {
        return None;
    }
    if language::is_supported(&normalized) {
        return Some(normalized);
    }
    tracing::warn!(hint, "language not supported, using auto-detection");
    None
}

#[async_trait]
impl TranscriptionPort for WhisperTranscriptionAdapter {
    async fn transcribe(
        &self,
        audio_path: &Path,
        language_hint: &str,
    ) -> Result<TranscriptionResult, DomainError> {
        tracing::info!(
            path = %audio_path.display(),
            language_hint,
            "starting transcription"
        );
        let decode_language = resolve_decode_language(language_hint);
        let result = self.transcribe_file(audio_path, decode_language)?;
        tracing::info!(word_count = result.word_count, "transcription complete");
        Ok(result)
    }
}

#[cfg(feature = "whisper-runtime")]
impl WhisperTranscriptionAdapter {
    fn transcribe_file(
        &self,
        audio_path: &Path,
        decode_language: Option<String>,
    ) -> Result<TranscriptionResult, DomainError> {
        let samples = read_mono_samples(audio_path)?;

        let mut runtime = self
            .runtime
            .lock()
            .map_err(|_| DomainError::transcription("whisper runtime mutex poisoned"))?;
        if runtime.is_none() {
            tracing::info!(model_path = %self.config.model_path, "loading whisper model");
            let context = WhisperContext::new_with_params(
                &self.config.model_path,
                WhisperContextParameters::default(),
            )
            .map_err(|err| {
                DomainError::transcription(format!("failed to load whisper model: {err}"))
            })?;
            *runtime = Some(context);
        }
        let context = runtime.as_ref().ok_or_else(|| {
            DomainError::transcription("whisper context unavailable after initialization")
        })?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(decode_language.as_deref());
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_special(false);

        let mut state = context
            .create_state()
            .map_err(|err| DomainError::transcription(format!("whisper state error: {err}")))?;
        state
            .full(params, &samples)
            .map_err(|err| DomainError::transcription(format!("whisper decode error: {err}")))?;

        let segment_count = state
            .full_n_segments()
            .map_err(|err| DomainError::transcription(format!("whisper segments error: {err}")))?;
        let mut segments = Vec::with_capacity(segment_count as usize);
        for i in 0..segment_count {
            let text = state
                .full_get_segment_text(i)
                .map_err(|err| DomainError::transcription(format!("whisper text error: {err}")))?;
            let start = state.full_get_segment_t0(i).unwrap_or(0) as f64 / 100.0;
            let end = state.full_get_segment_t1(i).unwrap_or(0) as f64 / 100.0;
            segments.push(TranscriptSegment { text, start, end });
        }

        let text = segments
            .iter()
            .map(|segment| segment.text.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if text.is_empty() {
            return Err(DomainError::transcription(
                "Transcription resulted in empty text",
            ));
        }

        let detected = decode_language.unwrap_or_else(|| detected_language(&state));
        Ok(TranscriptionResult::new(text, detected, Some(segments)))
    }
}

#[cfg(feature = "whisper-runtime")]
fn detected_language(state: &whisper_rs::WhisperState) -> String {
    state
        .full_lang_id_from_state()
        .ok()
        .and_then(whisper_rs::get_lang_str)
        .unwrap_or("auto")
        .to_string()
}

/// Read a wav file and mix it down to mono f32. The download stage asks
/// ffmpeg for 16 kHz mono, so no resampling happens here.
#[cfg(feature = "whisper-runtime")]
fn read_mono_samples(audio_path: &Path) -> Result<Vec<f32>, DomainError> {
    let mut reader = hound::WavReader::open(audio_path)
        .map_err(|err| DomainError::transcription(format!("failed to open audio: {err}")))?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|err| DomainError::transcription(format!("failed to read audio: {err}")))?,
        hound::SampleFormat::Int => reader
            .samples::<i16>()
            .map(|s| s.map(|v| f32::from(v) / f32::from(i16::MAX)))
            .collect::<Result<_, _>>()
            .map_err(|err| DomainError::transcription(format!("failed to read audio: {err}")))?,
    };

    Ok(interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect())
}

#[cfg(not(feature = "whisper-runtime"))]
impl WhisperTranscriptionAdapter {
    fn transcribe_file(
        &self,
        _audio_path: &Path,
        decode_language: Option<String>,
    ) -> Result<TranscriptionResult, DomainError> {
        tracing::warn!(
            model_size = %self.config.model_size,
            "whisper runtime not compiled in, returning fallback transcript"
        );
        let language = decode_language.unwrap_or_else(|| self.config.default_language.clone());
        Ok(TranscriptionResult::new(
            "Transcription runtime is not enabled in this build. Rebuild with the \
             whisper-runtime feature to transcribe media."
                .to_string(),
            language,
            None,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_hint_degrades_to_auto_detection() {
        assert_eq!(resolve_decode_language("en"), Some("en".to_string()));
        assert_eq!(resolve_decode_language("ES"), Some("es".to_string()));
        assert_eq!(resolve_decode_language("auto"), None);
        assert_eq!(resolve_decode_language(""), None);
        assert_eq!(resolve_decode_language("xx"), None);
    }

    #[cfg(not(feature = "whisper-runtime"))]
    #[tokio::test]
    async fn fallback_build_still_produces_a_transcript() {
        let adapter = WhisperTranscriptionAdapter::new(WhisperAdapterConfig {
            model_path: "models/ggml-base.bin".to_string(),
            model_size: "base".to_string(),
            default_language: "auto".to_string(),
        });
        let result = adapter
            .transcribe(Path::new("/tmp/missing.wav"), "xx")
            .await
            .unwrap();
        assert!(!result.text.is_empty());
        assert_eq!(result.language, "auto");
        assert!(result.word_count > 0);
    }
}
