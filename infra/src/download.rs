use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;

use recap_domain::{AudioArtifact, DomainError, DownloadPort, VideoMetadata};

const DESCRIPTION_MAX_CHARS: usize = 500;
/// Extensions probed when yt-dlp picked a container other than the one
/// requested.
const AUDIO_EXTENSIONS: [&str; 5] = ["wav", "mp3", "m4a", "webm", "opus"];

#[derive(Debug, Clone)]
pub struct DownloadAdapterConfig {
    pub audio_dir: PathBuf,
    pub video_dir: PathBuf,
    pub max_duration_secs: u64,
}

/// Media acquisition through the `yt-dlp` binary: one JSON probe for
/// metadata and the duration ceiling, then an audio-only download into the
/// working directory.
pub struct YtDlpDownloadAdapter {
    config: DownloadAdapterConfig,
}

impl YtDlpDownloadAdapter {
    pub fn new(config: DownloadAdapterConfig) -> Result<Self, DomainError> {
        for dir in [&config.audio_dir, &config.video_dir] {
            std::fs::create_dir_all(dir).map_err(|err| {
                DomainError::internal(format!(
                    "failed to create working directory {}: {err}",
                    dir.display()
                ))
            })?;
        }
        Ok(Self { config })
    }

    async fn probe(&self, video_url: &str) -> Result<Value, DomainError> {
        let output = Command::new("yt-dlp")
            .args(["--dump-single-json", "--no-download", "--no-warnings", video_url])
            .output()
            .await
            .map_err(|err| DomainError::download(format!("failed to run yt-dlp: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainError::download(format!(
                "Failed to download video: {}",
                stderr.trim()
            )));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|err| DomainError::download(format!("unreadable yt-dlp metadata: {err}")))
    }

    async fn fetch_audio(&self, video_url: &str, video_id: &str) -> Result<PathBuf, DomainError> {
        let template = self
            .config
            .audio_dir
            .join(format!("{video_id}.%(ext)s"))
            .display()
            .to_string();
        let status = Command::new("yt-dlp")
            .args([
                "--extract-audio",
                "--audio-format",
                "wav",
                // 16 kHz mono, the sample layout the transcription model expects
                "--postprocessor-args",
                "ffmpeg:-ar 16000 -ac 1",
                "--quiet",
                "--no-warnings",
                "--output",
                &template,
                video_url,
            ])
            .status()
            .await
            .map_err(|err| DomainError::download(format!("failed to run yt-dlp: {err}")))?;

        if !status.success() {
            return Err(DomainError::download("Failed to download audio stream"));
        }

        for ext in AUDIO_EXTENSIONS {
            let candidate = self.config.audio_dir.join(format!("{video_id}.{ext}"));
            if candidate.exists() {
                return Ok(candidate);
            }
        }
        Err(DomainError::download("Audio file not found after download"))
    }
}

#[async_trait]
impl DownloadPort for YtDlpDownloadAdapter {
    async fn download(
        &self,
        video_url: &str,
        video_id: &str,
    ) -> Result<(AudioArtifact, VideoMetadata), DomainError> {
        tracing::info!(video_id, "probing video metadata");
        let info = self.probe(video_url).await?;
        let metadata = parse_metadata(&info);
        ensure_duration(metadata.duration, self.config.max_duration_secs)?;
        tracing::info!(
            title = %metadata.title,
            duration = metadata.duration,
            "downloading audio stream"
        );

        let audio_path = self.fetch_audio(video_url, video_id).await?;
        tracing::info!(path = %audio_path.display(), "audio extraction complete");
        Ok((AudioArtifact::new(audio_path), metadata))
    }

    async fn cleanup(&self, artifact: &AudioArtifact) {
        if let Err(err) = tokio::fs::remove_file(artifact.path()).await {
            tracing::warn!(
                path = %artifact.path().display(),
                error = %err,
                "failed to clean up audio artifact"
            );
        } else {
            tracing::info!(path = %artifact.path().display(), "cleaned up audio artifact");
        }
    }

    async fn cleanup_all(&self) {
        for dir in [&self.config.audio_dir, &self.config.video_dir] {
            if let Err(err) = sweep_directory(dir).await {
                tracing::warn!(dir = %dir.display(), error = %err, "failed to sweep directory");
            } else {
                tracing::info!(dir = %dir.display(), "cleaned up directory");
            }
        }
    }
}

async fn sweep_directory(dir: &Path) -> std::io::Result<()> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            tokio::fs::remove_file(entry.path()).await?;
        }
    }
    Ok(())
}

/// The ceiling check runs against probe metadata, before any download is
/// attempted; a violation is a fatal input error, not a transient one to
/// retry against the network.
fn ensure_duration(duration: u64, max_duration_secs: u64) -> Result<(), DomainError> {
    if duration > max_duration_secs {
        return Err(DomainError::validation(format!(
            "Video duration ({duration}s) exceeds maximum allowed ({max_duration_secs}s)"
        )));
    }
    Ok(())
}

fn parse_metadata(info: &Value) -> VideoMetadata {
    let description: String = info["description"]
        .as_str()
        .unwrap_or("")
        .chars()
        .take(DESCRIPTION_MAX_CHARS)
        .collect();
    VideoMetadata {
        title: info["title"].as_str().unwrap_or("Unknown").to_string(),
        author: info["uploader"].as_str().unwrap_or("Unknown").to_string(),
        duration: info["duration"].as_f64().unwrap_or(0.0) as u64,
        views: info["view_count"].as_u64().unwrap_or(0),
        thumbnail: info["thumbnail"].as_str().unwrap_or("").to_string(),
        description,
    }
}
