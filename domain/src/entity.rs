use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Validated input for a full pipeline run. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    pub video_url: String,
    pub video_id: String,
    pub source_language: String,
    pub target_language: Option<String>,
    pub summary_ratio: f64,
    pub include_translation: bool,
}

/// Handle to the extracted audio file. Owned by the pipeline runner until
/// the transcription stage consumes it, then removed from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    path: PathBuf,
}

impl AudioArtifact {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub author: String,
    pub duration: u64,
    pub views: u64,
    pub thumbnail: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub text: String,
    pub language: String,
    pub word_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<TranscriptSegment>>,
}

impl TranscriptionResult {
    pub fn new(text: String, language: String, segments: Option<Vec<TranscriptSegment>>) -> Self {
        let word_count = text.split_whitespace().count();
        Self {
            text,
            language,
            word_count,
            segments,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResult {
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    pub word_count: usize,
}

/// Unit of segmentation, scoring and selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub text: String,
}

impl Sentence {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A sentence paired with its importance score; the index is kept so the
/// selection can be restored to document order after ranking.
#[derive(Debug, Clone)]
pub struct ScoredSentence {
    pub index: usize,
    pub sentence: Sentence,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
    pub original_length: usize,
    pub summary_length: usize,
    pub reduction_ratio: f64,
    pub num_sentences: usize,
    pub summary_sentences: usize,
    pub compression_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordSummaryResult {
    pub summary: String,
    pub keywords_used: Vec<String>,
    pub original_length: usize,
    pub summary_length: usize,
    pub reduction_ratio: f64,
}
