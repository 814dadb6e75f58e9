use std::path::Path;

use crate::types::Transcript;

/// Format seconds as MM:SS timestamp
pub fn format_timestamp(seconds: f64) -> String {
    let mins = (seconds / 60.0) as u32;
    let secs = (seconds % 60.0) as u32;
    format!("{:02}:{:02}", mins, secs)
}

/// Total duration as M:SS from the last segment end, or "unknown".
///
/// Minutes are deliberately not zero-padded here, unlike
/// [`format_timestamp`]: this string goes into the metadata prompt as
/// "Duration: 2:05", while MM:SS is reserved for clip time ranges.
pub fn format_transcript_duration(transcript: &Transcript) -> String {
    match transcript.segments.last() {
        Some(seg) => {
            let mins = (seg.end / 60.0) as u32;
            let secs = (seg.end % 60.0) as u32;
            format!("{}:{:02}", mins, secs)
        }
        None => "unknown".to_string(),
    }
}

/// Render every segment as a `[12.3s - 45.6s] text` line for the analysis prompt.
pub fn format_segments_for_prompt(transcript: &Transcript) -> String {
    transcript
        .segments
        .iter()
        .map(|seg| format!("[{:.1}s - {:.1}s] {}", seg.start, seg.end, seg.text.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// File stem of the source video, used as the key for every output file.
pub fn video_base_name(video_path: &Path) -> String {
    video_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "video".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Segment;

    fn transcript(segments: Vec<Segment>) -> Transcript {
        Transcript {
            text: String::new(),
            segments,
        }
    }

    #[test]
    fn timestamp_zero() {
        assert_eq!(format_timestamp(0.0), "00:00");
    }

    #[test]
    fn timestamp_splits_minutes_and_seconds() {
        assert_eq!(format_timestamp(75.0), "01:15");
        assert_eq!(format_timestamp(600.0), "10:00");
    }

    #[test]
    fn timestamp_floors_fractional_seconds() {
        assert_eq!(format_timestamp(61.9), "01:01");
        assert_eq!(format_timestamp(59.999), "00:59");
    }

    #[test]
    fn duration_unknown_without_segments() {
        assert_eq!(format_transcript_duration(&transcript(vec![])), "unknown");
    }

    #[test]
    fn duration_comes_from_last_segment_end() {
        let t = transcript(vec![
            Segment {
                start: 0.0,
                end: 60.0,
                text: "a".into(),
            },
            Segment {
                start: 60.0,
                end: 125.0,
                text: "b".into(),
            },
        ]);
        assert_eq!(format_transcript_duration(&t), "2:05");
    }

    #[test]
    fn prompt_lines_use_one_decimal_and_trim_text() {
        let t = transcript(vec![Segment {
            start: 0.0,
            end: 2.5,
            text: " hello ".into(),
        }]);
        assert_eq!(format_segments_for_prompt(&t), "[0.0s - 2.5s] hello");
    }

    #[test]
    fn base_name_strips_directory_and_extension() {
        assert_eq!(video_base_name(Path::new("videos/demo.mp4")), "demo");
        assert_eq!(video_base_name(Path::new("demo")), "demo");
    }
}
