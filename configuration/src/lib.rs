use std::env;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub type AppConfig = RecapConfig;

/// Environment variable prefix for overrides.
const ENV_PREFIX: &str = "RECAP_SERVICE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {variable}: {message}")]
    InvalidValue { variable: String, message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecapConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub transcription: TranscriptionConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    #[serde(default = "default_audio_dir")]
    pub audio_dir: String,
    #[serde(default = "default_video_dir")]
    pub video_dir: String,
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    #[serde(default = "default_model_path")]
    pub model_path: String,
    #[serde(default = "default_model_size")]
    pub model_size: String,
    #[serde(default = "default_language")]
    pub default_language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(default = "default_translation_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_chunk_max_chars")]
    pub chunk_max_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    #[serde(default = "default_min_sentences")]
    pub min_sentences: usize,
    #[serde(default = "default_min_sentence_chars")]
    pub min_sentence_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_download_retry")]
    pub download: RetryStageConfig,
    #[serde(default = "default_transcribe_retry")]
    pub transcribe: RetryStageConfig,
    #[serde(default = "default_translate_retry")]
    pub translate: RetryStageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryStageConfig {
    pub attempts: u32,
    pub delay_ms: u64,
}

impl Default for RecapConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            service: ServiceConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            download: DownloadConfig::default(),
            transcription: TranscriptionConfig::default(),
            translation: TranslationConfig::default(),
            summary: SummaryConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            audio_dir: default_audio_dir(),
            video_dir: default_video_dir(),
            max_duration_secs: default_max_duration(),
        }
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            model_size: default_model_size(),
            default_language: default_language(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_translation_endpoint(),
            chunk_max_chars: default_chunk_max_chars(),
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            min_sentences: default_min_sentences(),
            min_sentence_chars: default_min_sentence_chars(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            download: default_download_retry(),
            transcribe: default_transcribe_retry(),
            translate: default_translate_retry(),
        }
    }
}

/// Defaults overlaid with targeted environment overrides.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut config = RecapConfig::default();

    if let Some(host) = read_env("HOST") {
        config.server.host = host;
    }
    if let Some(port) = read_env("PORT") {
        config.server.port = parse_env("PORT", &port)?;
    }
    if let Some(level) = read_env("LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(max) = read_env("MAX_VIDEO_DURATION") {
        config.service.download.max_duration_secs = parse_env("MAX_VIDEO_DURATION", &max)?;
    }
    if let Some(size) = read_env("WHISPER_MODEL_SIZE") {
        config.service.transcription.model_size = size;
    }
    if let Some(path) = read_env("WHISPER_MODEL_PATH") {
        config.service.transcription.model_path = path;
    }
    if let Some(endpoint) = read_env("TRANSLATION_ENDPOINT") {
        config.service.translation.endpoint = endpoint;
    }

    Ok(config)
}

fn read_env(suffix: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{suffix}")).ok()
}

fn parse_env<T: std::str::FromStr>(variable: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|err: T::Err| ConfigError::InvalidValue {
        variable: format!("{ENV_PREFIX}_{variable}"),
        message: err.to_string(),
    })
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// configured level when set.
pub fn setup_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_audio_dir() -> String {
    "temp_audio".to_string()
}

fn default_video_dir() -> String {
    "temp_videos".to_string()
}

fn default_max_duration() -> u64 {
    7_200
}

fn default_model_path() -> String {
    "models/ggml-base.bin".to_string()
}

fn default_model_size() -> String {
    "base".to_string()
}

fn default_language() -> String {
    "auto".to_string()
}

fn default_translation_endpoint() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_chunk_max_chars() -> usize {
    4_500
}

fn default_min_sentences() -> usize {
    3
}

fn default_min_sentence_chars() -> usize {
    10
}

fn default_download_retry() -> RetryStageConfig {
    RetryStageConfig {
        attempts: 3,
        delay_ms: 2_000,
    }
}

fn default_transcribe_retry() -> RetryStageConfig {
    RetryStageConfig {
        attempts: 2,
        delay_ms: 3_000,
    }
}

fn default_translate_retry() -> RetryStageConfig {
    RetryStageConfig {
        attempts: 3,
        delay_ms: 1_000,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_are_deterministic() {
        let cfg = RecapConfig::default();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.service.download.max_duration_secs, 7_200);
        assert_eq!(cfg.service.translation.chunk_max_chars, 4_500);
        assert_eq!(cfg.service.summary.min_sentences, 3);
        assert_eq!(cfg.service.retry.transcribe.attempts, 2);
    }
}
