use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::error::{KlipushkaError, Result};
use crate::format::video_base_name;
use crate::types::ClipCandidate;

/// Sharp letterboxed foreground over a blurred cover-cropped background,
/// on a 1080x1920 canvas.
const VERTICAL_FILTER: &str = "[0:v]scale=1080:1920:force_original_aspect_ratio=increase,crop=1080:1920,boxblur=20:5[bg];\
[0:v]scale=1080:1920:force_original_aspect_ratio=decrease,pad=1080:1920:(ow-iw)/2:(oh-ih)/2:black[fg];\
[bg][fg]overlay=(W-w)/2:(H-h)/2[v]";

/// x264/AAC parameters shared by the vertical and re-encode paths.
const ENCODE_ARGS: [&str; 14] = [
    "-c:v", "libx264", "-crf", "23", "-preset", "medium", "-c:a", "aac", "-b:a", "128k", "-ar",
    "44100", "-ac", "2",
];

/// How a clip ended up on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutMethod {
    StreamCopy,
    Reencode,
    Vertical,
}

/// Per-candidate result of a cutting batch, in input order.
#[derive(Debug)]
pub struct ClipOutcome {
    pub index: usize,
    pub path: PathBuf,
    pub result: Result<CutMethod>,
}

/// Cuts candidate time ranges out of the source video with ffmpeg.
pub struct ClipCutter {
    ffmpeg: OsString,
}

impl Default for ClipCutter {
    fn default() -> Self {
        Self {
            ffmpeg: OsString::from("ffmpeg"),
        }
    }
}

impl ClipCutter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different ffmpeg binary (tests inject a stub here).
    pub fn with_binary(ffmpeg: impl Into<OsString>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
        }
    }

    fn cut_failed(output_path: &Path, stderr: &[u8]) -> KlipushkaError {
        KlipushkaError::ClipCutFailed {
            output_path: output_path.to_path_buf(),
            reason: String::from_utf8_lossy(stderr).to_string(),
        }
    }

    async fn run_vertical(
        &self,
        video_path: &Path,
        start: f64,
        duration: f64,
        output_path: &Path,
    ) -> Result<std::process::Output> {
        Ok(Command::new(&self.ffmpeg)
            .arg("-ss")
            .arg(start.to_string())
            .arg("-i")
            .arg(video_path)
            .arg("-t")
            .arg(duration.to_string())
            .arg("-filter_complex")
            .arg(VERTICAL_FILTER)
            .arg("-map")
            .arg("[v]")
            .arg("-map")
            .arg("0:a?")
            .args(ENCODE_ARGS)
            .arg("-movflags")
            .arg("+faststart")
            .arg("-y")
            .arg(output_path)
            .output()
            .await?)
    }

    async fn run_copy(
        &self,
        video_path: &Path,
        start: f64,
        duration: f64,
        output_path: &Path,
    ) -> Result<std::process::Output> {
        Ok(Command::new(&self.ffmpeg)
            .arg("-ss")
            .arg(start.to_string())
            .arg("-i")
            .arg(video_path)
            .arg("-t")
            .arg(duration.to_string())
            .arg("-c")
            .arg("copy")
            .arg("-avoid_negative_ts")
            .arg("make_zero")
            .arg("-y")
            .arg(output_path)
            .output()
            .await?)
    }

    async fn run_reencode(
        &self,
        video_path: &Path,
        start: f64,
        duration: f64,
        output_path: &Path,
    ) -> Result<std::process::Output> {
        Ok(Command::new(&self.ffmpeg)
            .arg("-ss")
            .arg(start.to_string())
            .arg("-i")
            .arg(video_path)
            .arg("-t")
            .arg(duration.to_string())
            .args(ENCODE_ARGS)
            .arg("-movflags")
            .arg("+faststart")
            .arg("-y")
            .arg(output_path)
            .output()
            .await?)
    }

    /// Cut one candidate range.
    ///
    /// Horizontal clips try a stream copy first; copy can only start on a
    /// source keyframe, so a failure falls back to a full re-encode.
    /// Vertical clips always re-encode through the blur filter graph and
    /// have no fallback.
    pub async fn cut_clip(
        &self,
        video_path: &Path,
        start_time: f64,
        end_time: f64,
        output_path: &Path,
        vertical: bool,
    ) -> Result<CutMethod> {
        let duration = end_time - start_time;

        if vertical {
            let output = self
                .run_vertical(video_path, start_time, duration, output_path)
                .await?;
            if !output.status.success() {
                return Err(Self::cut_failed(output_path, &output.stderr));
            }
            return Ok(CutMethod::Vertical);
        }

        let copy = self
            .run_copy(video_path, start_time, duration, output_path)
            .await?;
        if copy.status.success() {
            return Ok(CutMethod::StreamCopy);
        }

        let encoded = self
            .run_reencode(video_path, start_time, duration, output_path)
            .await?;
        if encoded.status.success() {
            Ok(CutMethod::Reencode)
        } else {
            Err(Self::cut_failed(output_path, &encoded.stderr))
        }
    }

    /// Cut every candidate in order. A candidate whose cut fails is kept in
    /// the outcomes with its error and the batch continues.
    pub async fn generate_all_clips(
        &self,
        video_path: &Path,
        clips: &[ClipCandidate],
        output_dir: &Path,
        vertical: bool,
    ) -> Vec<ClipOutcome> {
        let video_name = video_base_name(video_path);
        let mut outcomes = Vec::with_capacity(clips.len());

        for (i, clip) in clips.iter().enumerate() {
            let index = i + 1;
            let output_path = output_dir.join(format!("{video_name}_clip_{index:02}.mp4"));
            let result = self
                .cut_clip(
                    video_path,
                    clip.start_time,
                    clip.end_time,
                    &output_path,
                    vertical,
                )
                .await;
            outcomes.push(ClipOutcome {
                index,
                path: output_path,
                result,
            });
        }

        outcomes
    }
}

/// Paths of the clips that were actually produced, in input order.
pub fn generated_paths(outcomes: &[ClipOutcome]) -> Vec<PathBuf> {
    outcomes
        .iter()
        .filter(|outcome| outcome.result.is_ok())
        .map(|outcome| outcome.path.clone())
        .collect()
}
