use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{KlipushkaError, Result};

pub const MAX_CLIPS: u32 = 5;
pub const CLIP_MIN_DURATION: u32 = 15;
pub const CLIP_MAX_DURATION: u32 = 60;

/// Whisper model size, trading accuracy for latency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WhisperModel {
    Tiny,
    #[default]
    Small,
    Medium,
    Large,
}

impl WhisperModel {
    /// File name of the ggml model in the whisper.cpp Hugging Face repo.
    pub fn model_file(&self) -> &'static str {
        match self {
            WhisperModel::Tiny => "ggml-tiny.bin",
            WhisperModel::Small => "ggml-small.bin",
            WhisperModel::Medium => "ggml-medium.bin",
            WhisperModel::Large => "ggml-large-v3.bin",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WhisperModel::Tiny => "tiny",
            WhisperModel::Small => "small",
            WhisperModel::Medium => "medium",
            WhisperModel::Large => "large",
        }
    }
}

/// Per-run settings, built once from the CLI and passed down explicitly.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub max_clips: u32,
    pub min_duration: u32,
    pub max_duration: u32,
    pub whisper_model: WhisperModel,
    pub vertical: bool,
    pub skip_cutting: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_clips: MAX_CLIPS,
            min_duration: CLIP_MIN_DURATION,
            max_duration: CLIP_MAX_DURATION,
            whisper_model: WhisperModel::default(),
            vertical: false,
            skip_cutting: false,
        }
    }
}

/// Sibling output directories for every pipeline artifact.
#[derive(Clone, Debug)]
pub struct OutputDirs {
    pub audio: PathBuf,
    pub transcripts: PathBuf,
    pub reports: PathBuf,
    pub clips: PathBuf,
}

impl OutputDirs {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            audio: root.join("audio"),
            transcripts: root.join("transcripts"),
            reports: root.join("reports"),
            clips: root.join("clips"),
        }
    }

    /// Create all output directories. Safe to call repeatedly.
    pub async fn create_all(&self) -> Result<()> {
        for dir in [&self.audio, &self.transcripts, &self.reports, &self.clips] {
            fs::create_dir_all(dir).await?;
        }
        Ok(())
    }
}

impl Default for OutputDirs {
    fn default() -> Self {
        Self::new("output")
    }
}

/// Where downloaded Whisper models live across runs.
pub fn model_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("klipushka")
        .join("models")
}

/// Load the Anthropic API key, reading a local `.env` file if present.
pub fn load_api_key() -> Result<String> {
    dotenv::dotenv().ok();
    std::env::var("ANTHROPIC_API_KEY").map_err(|_| KlipushkaError::MissingApiKey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = RunConfig::default();
        assert_eq!(config.max_clips, 5);
        assert_eq!(config.min_duration, 15);
        assert_eq!(config.max_duration, 60);
        assert_eq!(config.whisper_model, WhisperModel::Small);
        assert!(!config.vertical);
        assert!(!config.skip_cutting);
    }

    #[test]
    fn model_files_cover_every_size() {
        assert_eq!(WhisperModel::Tiny.model_file(), "ggml-tiny.bin");
        assert_eq!(WhisperModel::Small.model_file(), "ggml-small.bin");
        assert_eq!(WhisperModel::Medium.model_file(), "ggml-medium.bin");
        assert_eq!(WhisperModel::Large.model_file(), "ggml-large-v3.bin");
    }

    #[tokio::test]
    async fn create_all_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let dirs = OutputDirs::new(root.path().join("output"));

        dirs.create_all().await.unwrap();
        dirs.create_all().await.unwrap();

        for dir in [&dirs.audio, &dirs.transcripts, &dirs.reports, &dirs.clips] {
            assert!(dir.is_dir());
        }
    }
}
