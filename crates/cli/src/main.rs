use std::path::PathBuf;
use std::process;

use clap::Parser;

use guided_capture_core::capture::domain::capture_sink::CaptureSink;
use guided_capture_core::capture::domain::completion_sink::{
    CompletionSink, LoggingCompletionSink,
};
use guided_capture_core::capture::infrastructure::png_capture_sink::PngCaptureSink;
use guided_capture_core::detection::domain::face_source::FaceSource;
use guided_capture_core::detection::infrastructure::trace_source::TraceFaceSource;
use guided_capture_core::feed::domain::frame_feed::FrameFeed;
use guided_capture_core::feed::infrastructure::synthetic_feed::SyntheticFeed;
use guided_capture_core::sequencer::guided_sequencer::GuidedCaptureSequencer;
use guided_capture_core::sequencer::pose_zone::PoseZone;
use guided_capture_core::sequencer::progress::ZoneStatus;
use guided_capture_core::sequencer::thresholds::{ProximityGate, ZoneThresholds};
use guided_capture_core::session::capture_session::{CaptureReport, CaptureSession, SessionConfig};
use guided_capture_core::session::session_logger::StdoutSessionLogger;

/// Guided five-pose face capture over a recorded detection trace.
#[derive(Parser)]
#[command(name = "guided-capture")]
struct Cli {
    /// JSON trace of per-frame face observations.
    trace: PathBuf,

    /// Directory to write captured photos into.
    #[arg(long, default_value = "captures")]
    out_dir: PathBuf,

    /// Evaluate every Nth frame (1 = every frame).
    #[arg(long, default_value = "3")]
    sample_interval: usize,

    /// Zone threshold overrides (JSON, partial tables allowed).
    #[arg(long)]
    thresholds: Option<PathBuf>,

    /// Frame width in pixels.
    #[arg(long, default_value = "1080")]
    frame_width: u32,

    /// Frame height in pixels.
    #[arg(long, default_value = "1920")]
    frame_height: u32,

    /// Feed frame rate.
    #[arg(long, default_value = "30.0")]
    fps: f64,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let thresholds = load_thresholds(&cli)?;
    let source = TraceFaceSource::from_file(&cli.trace)?;
    let total_frames = source.len();

    let feed: Box<dyn FrameFeed> = Box::new(SyntheticFeed::new(
        cli.frame_width,
        cli.frame_height,
        cli.fps,
        total_frames,
    ));
    let source: Box<dyn FaceSource> = Box::new(source);
    let sink: Box<dyn CaptureSink> = Box::new(PngCaptureSink::new(
        cli.out_dir.clone(),
        cli.frame_width,
        cli.frame_height,
    )?);
    let completion: Box<dyn CompletionSink> = Box::new(LoggingCompletionSink);

    let config = SessionConfig {
        sample_interval: cli.sample_interval,
        ..SessionConfig::default()
    };
    let mut session = CaptureSession::new(
        feed,
        source,
        sink,
        completion,
        GuidedCaptureSequencer::new(thresholds),
        config,
    );

    let mut logger = StdoutSessionLogger::new();
    let report = session.run(&mut logger)?;
    print_report(&report, session.progress());

    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.trace.exists() {
        return Err(format!("Trace file not found: {}", cli.trace.display()).into());
    }
    if cli.sample_interval == 0 {
        return Err("Sample interval must be at least 1".into());
    }
    if cli.frame_width == 0 || cli.frame_height == 0 {
        return Err(format!(
            "Frame dimensions must be positive, got {}x{}",
            cli.frame_width, cli.frame_height
        )
        .into());
    }
    if cli.fps <= 0.0 {
        return Err(format!("Frame rate must be positive, got {}", cli.fps).into());
    }
    Ok(())
}

fn load_thresholds(cli: &Cli) -> Result<ZoneThresholds, Box<dyn std::error::Error>> {
    match &cli.thresholds {
        Some(path) => Ok(ZoneThresholds::from_json_file(path)?),
        None => {
            let mut thresholds = ZoneThresholds::default();
            thresholds.proximity =
                ProximityGate::for_screen(cli.frame_width as f64, cli.frame_height as f64);
            Ok(thresholds)
        }
    }
}

fn print_report(
    report: &CaptureReport,
    progress: &guided_capture_core::sequencer::progress::CaptureProgress,
) {
    if report.completed {
        println!("Capture complete ({} frames evaluated):", report.frames_evaluated);
    } else {
        println!(
            "Capture incomplete ({} frames evaluated):",
            report.frames_evaluated
        );
    }
    for zone in PoseZone::ALL {
        let name = zone.to_string();
        match progress.status(zone) {
            ZoneStatus::Done(path) => println!("  {name:<6} -> {}", path.display()),
            _ => println!("  {name:<6} -> missing"),
        }
    }
}
