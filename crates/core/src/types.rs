use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

fn not_available() -> String {
    "N/A".to_string()
}

/// A suggested highlight with its marketing copy.
///
/// The model is asked for all fields, but only the time range and title are
/// required; older responses used `caption` instead of `hook`, and missing
/// copy fields fall back to "N/A" at the deserialization boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipCandidate {
    pub start_time: f64,
    pub end_time: f64,
    pub title: String,
    #[serde(alias = "caption", default = "not_available")]
    pub hook: String,
    #[serde(default = "not_available")]
    pub description: String,
    #[serde(default = "not_available")]
    pub thumbnail_text: String,
    #[serde(default = "not_available")]
    pub reason: String,
}

impl ClipCandidate {
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub thumbnail_text: String,
    pub category: String,
    #[serde(default)]
    pub key_moments: Vec<KeyMoment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyMoment {
    pub timestamp: String,
    pub description: String,
}

/// Machine-readable clips report written next to the text report.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClipReport {
    pub video_path: PathBuf,
    pub video_name: String,
    pub generated_at: String,
    pub clip_count: usize,
    pub clips: Vec<ClipCandidate>,
}
