//! Klipushka Core Library
//!
//! Core functionality for extracting audio from long-form videos,
//! transcribing with Whisper, selecting highlight moments with Claude,
//! and cutting the resulting clips with ffmpeg.

pub mod claude;
pub mod clips;
pub mod config;
pub mod error;
pub mod format;
pub mod highlights;
pub mod media;
pub mod metadata;
pub mod report;
pub mod transcriber;
pub mod types;

// Re-export commonly used items at crate root
pub use claude::Client;
pub use clips::{ClipCutter, ClipOutcome, CutMethod, generated_paths};
pub use config::{OutputDirs, RunConfig, WhisperModel, load_api_key, model_cache_dir};
pub use error::{KlipushkaError, Result};
pub use format::{format_segments_for_prompt, format_timestamp, video_base_name};
pub use highlights::analyze_highlights;
pub use media::{check_ffmpeg_installed, extract_audio};
pub use metadata::generate_video_metadata;
pub use report::{
    generate_json_report, generate_text_report, save_metadata_json, save_metadata_text,
};
pub use transcriber::{ensure_model, load_transcript, save_transcript, transcribe_audio};
pub use types::{ClipCandidate, ClipReport, KeyMoment, Segment, Transcript, VideoMetadata};
