#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use klipushka_core::{ClipCandidate, ClipCutter, CutMethod, generated_paths};

/// Write an executable shell script standing in for ffmpeg.
fn write_stub(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("ffmpeg-stub.sh");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

// The output path is always the last ffmpeg argument.
const TOUCH_OUTPUT: &str = r#"for last in "$@"; do :; done
touch "$last""#;

const FAIL_ON_COPY: &str = r#"for arg in "$@"; do
  if [ "$arg" = "copy" ]; then exit 1; fi
done"#;

fn candidate(start: f64, end: f64) -> ClipCandidate {
    ClipCandidate {
        start_time: start,
        end_time: end,
        title: "Test Clip".to_string(),
        hook: "N/A".to_string(),
        description: "N/A".to_string(),
        thumbnail_text: "N/A".to_string(),
        reason: "N/A".to_string(),
    }
}

#[tokio::test]
async fn stream_copy_is_tried_first() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), TOUCH_OUTPUT);
    let cutter = ClipCutter::with_binary(&stub);

    let out = dir.path().join("clip.mp4");
    let method = cutter
        .cut_clip(Path::new("demo.mp4"), 10.0, 25.0, &out, false)
        .await
        .unwrap();

    assert_eq!(method, CutMethod::StreamCopy);
    assert!(out.exists());
}

#[tokio::test]
async fn copy_failure_falls_back_to_reencode() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), &format!("{FAIL_ON_COPY}\n{TOUCH_OUTPUT}"));
    let cutter = ClipCutter::with_binary(&stub);

    let out = dir.path().join("clip.mp4");
    let method = cutter
        .cut_clip(Path::new("demo.mp4"), 10.0, 25.0, &out, false)
        .await
        .unwrap();

    assert_eq!(method, CutMethod::Reencode);
    assert!(out.exists());
}

#[tokio::test]
async fn vertical_failure_has_no_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(
        dir.path(),
        &format!(
            r#"for arg in "$@"; do
  if [ "$arg" = "-filter_complex" ]; then exit 1; fi
done
{TOUCH_OUTPUT}"#
        ),
    );
    let cutter = ClipCutter::with_binary(&stub);

    let out = dir.path().join("clip.mp4");
    let result = cutter
        .cut_clip(Path::new("demo.mp4"), 10.0, 25.0, &out, true)
        .await;

    assert!(result.is_err());
    assert!(!out.exists());
}

#[tokio::test]
async fn failed_candidate_is_dropped_and_batch_continues() {
    let dir = tempfile::tempdir().unwrap();
    // Every copy attempt fails; the re-encode of clip 02 fails too.
    let stub = write_stub(
        dir.path(),
        &format!(
            r#"{FAIL_ON_COPY}
for last in "$@"; do :; done
case "$last" in
  *_clip_02.mp4) exit 1 ;;
esac
touch "$last""#
        ),
    );
    let cutter = ClipCutter::with_binary(&stub);

    let clips = vec![
        candidate(0.0, 20.0),
        candidate(30.0, 50.0),
        candidate(60.0, 80.0),
    ];
    let outcomes = cutter
        .generate_all_clips(Path::new("demo.mp4"), &clips, dir.path(), false)
        .await;

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].result.is_ok());
    assert!(outcomes[1].result.is_err());
    assert!(outcomes[2].result.is_ok());

    let paths = generated_paths(&outcomes);
    let names: Vec<_> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["demo_clip_01.mp4", "demo_clip_03.mp4"]);
}

#[tokio::test]
async fn clip_filenames_are_two_digit_and_in_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), TOUCH_OUTPUT);
    let cutter = ClipCutter::with_binary(&stub);

    // Timestamps deliberately out of chronological order
    let clips = vec![
        candidate(300.0, 330.0),
        candidate(0.0, 20.0),
        candidate(100.0, 130.0),
    ];
    let outcomes = cutter
        .generate_all_clips(Path::new("videos/demo.mp4"), &clips, dir.path(), false)
        .await;

    let names: Vec<_> = outcomes
        .iter()
        .map(|o| o.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec!["demo_clip_01.mp4", "demo_clip_02.mp4", "demo_clip_03.mp4"]
    );
}
