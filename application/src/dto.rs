use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use recap_domain::{SummaryResult, TranscriptionResult, TranslationResult, VideoMetadata};

fn default_source_language() -> String {
    "en".to_string()
}

fn default_auto_language() -> String {
    "auto".to_string()
}

fn default_ratio() -> f64 {
    0.3
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProcessVideoRequest {
    #[validate(length(min = 1))]
    pub video_url: String,
    #[serde(default = "default_source_language")]
    pub source_language: String,
    pub target_language: Option<String>,
    #[serde(default = "default_ratio")]
    #[validate(range(min = 0.1, max = 0.5))]
    pub summary_ratio: f64,
    #[serde(default)]
    pub include_translation: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TranscribeVideoRequest {
    #[validate(length(min = 1))]
    pub video_url: String,
    #[serde(default = "default_source_language")]
    pub source_language: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TranslateTextRequest {
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
    #[serde(default = "default_auto_language")]
    pub source_language: String,
    #[validate(length(min = 1, message = "Target language is required"))]
    pub target_language: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SummarizeTextRequest {
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
    #[serde(default = "default_ratio")]
    #[validate(range(min = 0.1, max = 0.5))]
    pub ratio: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptionBlock {
    pub text: String,
    pub language: String,
    pub word_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryBlock {
    pub text: String,
    pub original_length: usize,
    pub summary_length: usize,
    pub reduction_ratio: f64,
    pub compression_percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranslationBlock {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
    pub word_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessVideoResponse {
    pub success: bool,
    pub video_id: String,
    pub metadata: VideoMetadata,
    pub transcription: TranscriptionBlock,
    pub summary: SummaryBlock,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<TranslationBlock>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscribeVideoResponse {
    pub success: bool,
    pub video_id: String,
    pub metadata: VideoMetadata,
    pub transcription: TranscriptionResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranslateTextResponse {
    pub success: bool,
    pub translation: TranslationResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummarizeTextResponse {
    pub success: bool,
    pub summary: SummaryResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguagesBlock {
    pub transcription: Vec<String>,
    pub translation: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguagesResponse {
    pub success: bool,
    pub languages: LanguagesBlock,
}
