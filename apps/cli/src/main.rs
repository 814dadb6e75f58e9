use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::signal;

use klipushka_core::{
    ClipCutter, CutMethod, KlipushkaError, OutputDirs, RunConfig, WhisperModel, analyze_highlights,
    check_ffmpeg_installed, claude, config, ensure_model, extract_audio, format_timestamp,
    generate_json_report, generate_text_report, generate_video_metadata, generated_paths,
    load_api_key, model_cache_dir,
    save_metadata_json, save_metadata_text, save_transcript, transcribe_audio, video_base_name,
};

/// CLI wrapper for WhisperModel enum (needed for clap ValueEnum)
#[derive(Clone, Copy, Default, ValueEnum)]
enum CliModel {
    Tiny,
    #[default]
    Small,
    Medium,
    Large,
}

impl From<CliModel> for WhisperModel {
    fn from(cli: CliModel) -> Self {
        match cli {
            CliModel::Tiny => WhisperModel::Tiny,
            CliModel::Small => WhisperModel::Small,
            CliModel::Medium => WhisperModel::Medium,
            CliModel::Large => WhisperModel::Large,
        }
    }
}

#[derive(Parser)]
#[command(name = "klipushka")]
#[command(about = "Extract highlight clips from long videos for YouTube Shorts")]
struct Cli {
    /// Path to the video file to process (leave empty to be prompted)
    video_path: Option<PathBuf>,

    /// Maximum number of clips to generate
    #[arg(long, default_value_t = config::MAX_CLIPS)]
    max_clips: u32,

    /// Minimum clip duration in seconds
    #[arg(long, default_value_t = config::CLIP_MIN_DURATION)]
    min_duration: u32,

    /// Maximum clip duration in seconds
    #[arg(long, default_value_t = config::CLIP_MAX_DURATION)]
    max_duration: u32,

    /// Whisper model size. Larger = more accurate but slower
    #[arg(long, default_value = "small")]
    whisper_model: CliModel,

    /// Skip video cutting, only generate reports
    #[arg(long)]
    skip_cutting: bool,

    /// Convert clips to vertical 9:16 format (1080x1920) with blurred background
    #[arg(long)]
    vertical: bool,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn prompt_video_path() -> Result<PathBuf> {
    let term = Term::stderr();
    term.write_line("No video path provided.")?;
    term.write_str("Enter the path to a video file: ")?;
    let line = term.read_line()?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        anyhow::bail!("No file selected");
    }
    Ok(PathBuf::from(trimmed))
}

fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<KlipushkaError>() {
        Some(known) => eprintln!("{} {}", style("Error:").red().bold(), known),
        // full trace for anything we did not categorize
        None => eprintln!("{} {:?}", style("Error:").red().bold(), err),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = RunConfig {
        max_clips: cli.max_clips,
        min_duration: cli.min_duration,
        max_duration: cli.max_duration,
        whisper_model: cli.whisper_model.into(),
        vertical: cli.vertical,
        skip_cutting: cli.skip_cutting,
    };

    let dirs = OutputDirs::default();
    dirs.create_all().await?;

    // Dependency check: report everything missing at once
    let ffmpeg_ok = check_ffmpeg_installed().await;
    let api_key = load_api_key();
    if !ffmpeg_ok || api_key.is_err() {
        eprintln!("{} Missing dependencies:", style("✗").red().bold());
        if !ffmpeg_ok {
            eprintln!("  - FFmpeg is not installed or not in PATH");
        }
        if let Err(e) = &api_key {
            eprintln!("  - {e}");
        }
        eprintln!("\nPlease:");
        eprintln!("  1. Install FFmpeg: https://ffmpeg.org/download.html");
        eprintln!("  2. Create a .env file with: ANTHROPIC_API_KEY=your_key_here");
        std::process::exit(1);
    }
    let api_key = api_key?;

    let video_path = match cli.video_path {
        Some(path) => path,
        None => prompt_video_path()?,
    };

    println!(
        "\n{}  {}\n",
        style("klipushka").cyan().bold(),
        style("Shorts Highlight Extractor").dim()
    );
    println!("{}", style("─".repeat(60)).dim());

    if !video_path.exists() {
        return Err(KlipushkaError::VideoNotFound(video_path).into());
    }

    let video_name = video_base_name(&video_path);
    println!(
        "{} Video loaded: {}",
        style("✓").green().bold(),
        style(video_path.file_name().unwrap_or_default().to_string_lossy()).dim()
    );

    // Step 1: Extract audio
    let audio_path = dirs.audio.join(format!("{video_name}_audio.wav"));
    let spinner = create_spinner("Extracting audio...");
    extract_audio(&video_path, &audio_path).await?;
    spinner.finish_with_message(format!("{} Audio extracted", style("✓").green().bold()));

    // Step 2: Transcribe
    let spinner = create_spinner("Checking Whisper model...");
    let model_path = ensure_model(config.whisper_model, &model_cache_dir()).await?;
    spinner.finish_with_message(format!(
        "{} Model ready ({})",
        style("✓").green().bold(),
        style(config.whisper_model.name()).yellow()
    ));

    let spinner = create_spinner(&format!(
        "Transcribing with Whisper ({} model)...",
        config.whisper_model.name()
    ));
    let transcript = transcribe_audio(&audio_path, &model_path).await?;
    let transcript_path = dirs
        .transcripts
        .join(format!("{video_name}_transcript.json"));
    save_transcript(&transcript, &transcript_path).await?;
    let duration_mins = transcript
        .segments
        .last()
        .map(|s| s.end / 60.0)
        .unwrap_or(0.0);
    spinner.finish_with_message(format!(
        "{} Transcribed: {:.1} min, {} segments",
        style("✓").green().bold(),
        duration_mins,
        transcript.segments.len()
    ));

    let client = claude::Client::new(api_key);

    // Step 3A: Full-video metadata
    let spinner = create_spinner("Generating video metadata with Claude...");
    let metadata = generate_video_metadata(&client, &transcript, &video_name).await?;
    spinner.finish_with_message(format!(
        "{} Video metadata generated",
        style("✓").green().bold()
    ));
    println!("   Title: {}", style(&metadata.title).bold());
    println!("   Category: {}", metadata.category);

    // Step 3B: Highlights
    let spinner = create_spinner("Analyzing highlights with Claude...");
    let clips = analyze_highlights(&client, &transcript, &config).await?;
    spinner.finish_with_message(format!(
        "{} Found {} potential clips",
        style("✓").green().bold(),
        clips.len()
    ));

    println!("\n{}", style("─".repeat(60)).dim());
    println!("{}", style("SUGGESTED CLIPS:").bold());
    println!("{}", style("─".repeat(60)).dim());
    for (i, clip) in clips.iter().enumerate() {
        println!("\n  {}. \"{}\"", i + 1, style(&clip.title).bold());
        println!(
            "     Time: {} - {} ({:.0}s)",
            format_timestamp(clip.start_time),
            format_timestamp(clip.end_time),
            clip.duration()
        );
        println!("     Hook: {}", clip.hook);
        println!("     Thumbnail: {}", clip.thumbnail_text);
    }

    // Step 4: Reports
    let spinner = create_spinner("Generating reports...");
    let metadata_json = save_metadata_json(&metadata, &video_path, &dirs.reports).await?;
    let metadata_txt = save_metadata_text(&metadata, &video_path, &dirs.reports).await?;
    let clips_json = generate_json_report(&clips, &video_path, &dirs.reports).await?;
    let clips_txt = generate_text_report(&clips, &video_path, &dirs.reports).await?;
    spinner.finish_with_message(format!("{} Reports saved:", style("✓").green().bold()));
    println!("  Full Video Metadata:");
    println!("    - {}", style(metadata_json.display()).cyan());
    println!("    - {}", style(metadata_txt.display()).cyan());
    println!("  Clips Reports:");
    println!("    - {}", style(clips_json.display()).cyan());
    println!("    - {}", style(clips_txt.display()).cyan());

    // Step 5: Cut clips (optional)
    if config.skip_cutting {
        println!(
            "\n{} Skipped video cutting (--skip-cutting flag)",
            style("⏭").yellow()
        );
    } else {
        let spinner = create_spinner(&format!("Cutting {} clips with FFmpeg...", clips.len()));
        let cutter = ClipCutter::new();
        let outcomes = cutter
            .generate_all_clips(&video_path, &clips, &dirs.clips, config.vertical)
            .await;
        spinner.finish_and_clear();

        for outcome in &outcomes {
            match &outcome.result {
                Ok(CutMethod::Reencode) => println!(
                    "  {} Clip {} saved (re-encoded)",
                    style("✓").green().bold(),
                    outcome.index
                ),
                Ok(_) => println!(
                    "  {} Clip {} saved",
                    style("✓").green().bold(),
                    outcome.index
                ),
                Err(e) => println!(
                    "  {} Failed to cut clip {}: {}",
                    style("✗").red().bold(),
                    outcome.index,
                    e
                ),
            }
        }

        let paths = generated_paths(&outcomes);
        let format_info = if config.vertical {
            " (vertical 9:16)"
        } else {
            ""
        };
        println!(
            "\n{} {} clips saved to {}{}",
            style("✓").green().bold(),
            paths.len(),
            style(dirs.clips.display()).cyan(),
            format_info
        );
    }

    println!("\n{} Complete!\n", style("✅").green());

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let exit_code = tokio::select! {
        result = run(cli) => match result {
            Ok(()) => 0,
            Err(err) => {
                report_error(&err);
                1
            }
        },
        _ = signal::ctrl_c() => {
            eprintln!("\n{} Interrupted by user", style("⚠").yellow().bold());
            1
        }
    };

    std::process::exit(exit_code);
}
