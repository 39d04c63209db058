use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;

use crate::{AudioArtifact, DomainError, TranscriptionResult, TranslationResult, VideoMetadata};

/// Media acquisition boundary: probes metadata, enforces the duration
/// ceiling before any download happens, and owns the temp directories the
/// audio artifacts live in.
#[async_trait]
pub trait DownloadPort: Send + Sync {
    async fn download(
        &self,
        video_url: &str,
        video_id: &str,
    ) -> Result<(AudioArtifact, VideoMetadata), DomainError>;

    /// Remove a single consumed artifact. Failures are logged, not raised.
    async fn cleanup(&self, artifact: &AudioArtifact);

    /// Coarse sweep of every file under the working directories. Used on
    /// the pipeline error path under the single-request assumption.
    async fn cleanup_all(&self);
}

#[async_trait]
pub trait TranscriptionPort: Send + Sync {
    /// Transcribe the audio file. An unsupported `language_hint` degrades
    /// to automatic language detection rather than failing.
    async fn transcribe(
        &self,
        audio_path: &Path,
        language_hint: &str,
    ) -> Result<TranscriptionResult, DomainError>;
}

#[async_trait]
pub trait TranslationPort: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<TranslationResult, DomainError>;

    /// Language code to display name, for the capability listing.
    fn supported_languages(&self) -> BTreeMap<String, String>;
}

/// Maps a sentence to a fixed-length vector. Implementations bound their
/// own input length and must be deterministic for identical input.
#[async_trait]
pub trait EmbeddingPort: Send + Sync {
    async fn embed(&self, sentence: &str) -> Result<Vec<f32>, DomainError>;
}
