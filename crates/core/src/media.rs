use std::path::Path;

use tokio::process::Command;

use crate::error::{KlipushkaError, Result};

/// Check whether ffmpeg can be invoked at all.
pub async fn check_ffmpeg_installed() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Extract audio as mono 16 kHz PCM WAV, the input format Whisper expects.
/// Overwrites any existing file at `audio_path`.
pub async fn extract_audio(video_path: &Path, audio_path: &Path) -> Result<()> {
    if !video_path.exists() {
        return Err(KlipushkaError::VideoNotFound(video_path.to_path_buf()));
    }

    if !check_ffmpeg_installed().await {
        return Err(KlipushkaError::FfmpegMissing);
    }

    let output = Command::new("ffmpeg")
        .arg("-y")
        .arg("-i")
        .arg(video_path)
        .arg("-vn")
        .arg("-acodec")
        .arg("pcm_s16le")
        .arg("-ar")
        .arg("16000")
        .arg("-ac")
        .arg("1")
        .arg(audio_path)
        .output()
        .await?;

    if !output.status.success() {
        return Err(KlipushkaError::AudioExtractionFailed {
            video_path: video_path.to_path_buf(),
            reason: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_video_is_reported_before_ffmpeg_runs() {
        let result = extract_audio(Path::new("does/not/exist.mp4"), Path::new("out.wav")).await;
        assert!(matches!(result, Err(KlipushkaError::VideoNotFound(_))));
    }
}
