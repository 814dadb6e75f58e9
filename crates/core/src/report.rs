use std::path::{Path, PathBuf};

use chrono::Local;
use tokio::fs;

use crate::error::Result;
use crate::format::{format_timestamp, video_base_name};
use crate::types::{ClipCandidate, ClipReport, VideoMetadata};

/// Write the machine-readable clips report, returning its path.
pub async fn generate_json_report(
    clips: &[ClipCandidate],
    video_path: &Path,
    output_dir: &Path,
) -> Result<PathBuf> {
    let video_name = video_base_name(video_path);
    let output_path = output_dir.join(format!("{video_name}_clips.json"));

    let report = ClipReport {
        video_path: video_path.to_path_buf(),
        video_name,
        generated_at: Local::now().to_rfc3339(),
        clip_count: clips.len(),
        clips: clips.to_vec(),
    };

    fs::write(&output_path, serde_json::to_string_pretty(&report)?).await?;
    Ok(output_path)
}

/// Write the human-readable clips report, returning its path.
pub async fn generate_text_report(
    clips: &[ClipCandidate],
    video_path: &Path,
    output_dir: &Path,
) -> Result<PathBuf> {
    let video_name = video_base_name(video_path);
    let output_path = output_dir.join(format!("{video_name}_clips.txt"));

    let file_name = video_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or(video_name);

    let mut lines = vec![
        "=".repeat(70),
        "YOUTUBE SHORTS CLIP SUGGESTIONS".to_string(),
        "=".repeat(70),
        format!("Video: {file_name}"),
        format!("Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S")),
        format!("Total Clips: {}", clips.len()),
        "=".repeat(70),
        String::new(),
    ];

    for (i, clip) in clips.iter().enumerate() {
        lines.extend([
            format!("CLIP {}: {}", i + 1, clip.title),
            format!(
                "Time: {} - {} ({:.0}s)",
                format_timestamp(clip.start_time),
                format_timestamp(clip.end_time),
                clip.duration()
            ),
            String::new(),
            format!("Hook: {}", clip.hook),
            format!("Description: {}", clip.description),
            format!("Thumbnail Text: {}", clip.thumbnail_text),
            String::new(),
            format!("Why this works: {}", clip.reason),
            "-".repeat(70),
            String::new(),
        ]);
    }

    fs::write(&output_path, lines.join("\n")).await?;
    Ok(output_path)
}

/// Write full-video metadata as pretty JSON.
pub async fn save_metadata_json(
    metadata: &VideoMetadata,
    video_path: &Path,
    output_dir: &Path,
) -> Result<PathBuf> {
    let video_name = video_base_name(video_path);
    let output_path = output_dir.join(format!("{video_name}_metadata.json"));

    fs::write(&output_path, serde_json::to_string_pretty(metadata)?).await?;
    Ok(output_path)
}

/// Write full-video metadata as a human-readable text file.
pub async fn save_metadata_text(
    metadata: &VideoMetadata,
    video_path: &Path,
    output_dir: &Path,
) -> Result<PathBuf> {
    let video_name = video_base_name(video_path);
    let output_path = output_dir.join(format!("{video_name}_metadata.txt"));

    let mut out = String::new();
    out.push_str(&"=".repeat(70));
    out.push_str("\nFULL VIDEO YOUTUBE METADATA\n");
    out.push_str(&"=".repeat(70));
    out.push_str("\n\n");
    out.push_str(&format!("TITLE:\n{}\n\n", metadata.title));
    out.push_str(&format!("DESCRIPTION:\n{}\n\n", metadata.description));
    out.push_str(&format!("TAGS:\n{}\n\n", metadata.tags.join(", ")));
    out.push_str(&format!("THUMBNAIL TEXT:\n{}\n\n", metadata.thumbnail_text));
    out.push_str(&format!("CATEGORY:\n{}\n\n", metadata.category));
    out.push_str("KEY MOMENTS / CHAPTERS:\n");
    for moment in &metadata.key_moments {
        out.push_str(&format!("  {} - {}\n", moment.timestamp, moment.description));
    }
    out.push('\n');
    out.push_str(&"=".repeat(70));
    out.push('\n');

    fs::write(&output_path, out).await?;
    Ok(output_path)
}
