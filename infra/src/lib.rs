pub mod download;
pub mod embedding;
pub mod transcription;
pub mod translation;

pub use download::{DownloadAdapterConfig, YtDlpDownloadAdapter};
pub use embedding::HashedNgramEmbeddingAdapter;
pub use transcription::{WhisperAdapterConfig, WhisperTranscriptionAdapter};
pub use translation::{GoogleTranslateAdapter, TranslateAdapterConfig};
