use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::config::WhisperModel;
use crate::error::{KlipushkaError, Result};
use crate::types::{Segment, Transcript};

const MODEL_BASE_URL: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

/// Download the ggml model file on first use and return its path.
pub async fn ensure_model(model: WhisperModel, model_dir: &Path) -> Result<PathBuf> {
    ensure_model_from(model, model_dir, MODEL_BASE_URL).await
}

async fn ensure_model_from(
    model: WhisperModel,
    model_dir: &Path,
    base_url: &str,
) -> Result<PathBuf> {
    let file_name = model.model_file();
    let model_path = model_dir.join(file_name);
    if model_path.exists() {
        return Ok(model_path);
    }

    fs::create_dir_all(model_dir).await?;

    let url = format!("{base_url}/{file_name}");
    let mut response = reqwest::get(&url).await?;
    if !response.status().is_success() {
        return Err(KlipushkaError::ModelDownloadFailed {
            reason: format!("HTTP {}", response.status()),
            url,
        });
    }

    // Stream to a partial file; the final path only ever holds a complete
    // model, since the exists() check above would accept a truncated one.
    let partial_path = model_dir.join(format!("{file_name}.partial"));
    let mut file = fs::File::create(&partial_path).await?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    drop(file);
    fs::rename(&partial_path, &model_path).await?;

    Ok(model_path)
}

/// Transcribe a 16 kHz mono WAV with whisper.cpp, greedy sampling.
///
/// Inference runs on a blocking worker thread so the caller's runtime
/// keeps polling (spinners, ctrl-c) while whisper churns.
pub async fn transcribe_audio(audio_path: &Path, model_path: &Path) -> Result<Transcript> {
    let audio = audio_path.to_path_buf();
    let model = model_path.to_path_buf();
    tokio::task::spawn_blocking(move || run_whisper(&audio, &model))
        .await
        .map_err(|e| KlipushkaError::TranscriptionFailed {
            audio_path: audio_path.to_path_buf(),
            reason: format!("transcription task failed: {e}"),
        })?
}

fn run_whisper(audio_path: &Path, model_path: &Path) -> Result<Transcript> {
    if !audio_path.exists() {
        return Err(KlipushkaError::AudioNotFound(audio_path.to_path_buf()));
    }

    let mut reader = hound::WavReader::open(audio_path)?;
    let samples = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<i16>, _>>()?;
    let samples: Vec<f32> = samples
        .iter()
        .map(|s| *s as f32 / i16::MAX as f32)
        .collect();

    let whisper_err = |reason: String| KlipushkaError::TranscriptionFailed {
        audio_path: audio_path.to_path_buf(),
        reason,
    };

    let model_path_str = model_path.to_string_lossy();
    let ctx = WhisperContext::new_with_params(&model_path_str, WhisperContextParameters::default())
        .map_err(|e| whisper_err(format!("failed to load model: {e}")))?;

    let params = FullParams::new(SamplingStrategy::Greedy { best_of: 5 });

    let mut state = ctx
        .create_state()
        .map_err(|e| whisper_err(format!("failed to create state: {e}")))?;
    state
        .full(params, &samples)
        .map_err(|e| whisper_err(format!("inference failed: {e}")))?;

    let mut text = String::new();
    let mut segments: Vec<Segment> = Vec::new();

    for segment in state.as_iter() {
        let Ok(seg_text) = segment.to_str() else {
            continue;
        };
        // Whisper timestamps are in centiseconds
        segments.push(Segment {
            start: segment.start_timestamp() as f64 / 100.0,
            end: segment.end_timestamp() as f64 / 100.0,
            text: seg_text.to_string(),
        });
        text.push_str(seg_text);
    }

    Ok(Transcript { text, segments })
}

/// Save a transcript as pretty-printed JSON, non-ASCII left literal.
pub async fn save_transcript(transcript: &Transcript, path: &Path) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(transcript)?).await?;
    Ok(())
}

/// Load a previously saved transcript.
pub async fn load_transcript(path: &Path) -> Result<Transcript> {
    let json_content = fs::read_to_string(path).await?;
    let transcript: Transcript = serde_json::from_str(&json_content)?;
    Ok(transcript)
}
