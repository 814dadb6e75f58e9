use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KlipushkaError {
    #[error("FFmpeg is not installed or not in PATH")]
    FfmpegMissing,

    #[error("ANTHROPIC_API_KEY environment variable is not set")]
    MissingApiKey,

    #[error("Video file not found: {0}")]
    VideoNotFound(PathBuf),

    #[error("Audio file not found: {0}")]
    AudioNotFound(PathBuf),

    #[error("Audio extraction failed for {video_path}: {reason}")]
    AudioExtractionFailed { video_path: PathBuf, reason: String },

    #[error("Transcription failed for {audio_path}: {reason}")]
    TranscriptionFailed { audio_path: PathBuf, reason: String },

    #[error("Model download failed for {url}: {reason}")]
    ModelDownloadFailed { url: String, reason: String },

    #[error("Analysis failed: {reason}")]
    AnalysisFailed { reason: String },

    #[error("Clip cut failed for {output_path}: {reason}")]
    ClipCutFailed { output_path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("WAV read error: {0}")]
    Wav(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, KlipushkaError>;
