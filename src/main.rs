//! cuesync - Entry Point
//!
//! Replays a playback clock over a cue file and prints what a caption host
//! would see: active-cue changes, auto-scroll requests, and the formatted
//! transcript.

use clap::Parser;
use cuesync::engine::{DisplayMode, TickOutput, TranscriptSegment};
use cuesync::model::{AppError, SourceUrl};
use cuesync::resolver::BoundaryPolicy;
use cuesync::scroll::LineLayoutSnapshot;
use cuesync::source::{self, FileFetcher, JsonCueParser};
use cuesync::SyncEngine;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

/// cuesync - replay a playback clock against caption cues
#[derive(Parser, Debug)]
#[command(name = "cuesync")]
#[command(version)]
#[command(about = "Resolve active caption cues, format transcripts, and compute auto-scroll targets")]
pub struct Args {
    /// Path to a JSON cue array (`sequence`, `startTime`, `endTime`, `text`)
    pub cues: PathBuf,

    /// Playback time in milliseconds to evaluate (repeatable; overrides the sweep)
    #[arg(long = "at", value_name = "MS")]
    pub at: Vec<u64>,

    /// Sweep start in milliseconds
    #[arg(long, default_value = "0", value_name = "MS")]
    pub from: u64,

    /// Sweep end in milliseconds (defaults to the end of the last cue)
    #[arg(long, value_name = "MS")]
    pub to: Option<u64>,

    /// Sweep step in milliseconds
    #[arg(long, default_value = "250", value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub step: u64,

    /// Gap policy between cues
    #[arg(long, value_parser = ["strict", "nearest-fallback"])]
    pub policy: Option<String>,

    /// Transcript layout
    #[arg(long, value_parser = ["paragraph", "list"])]
    pub mode: Option<String>,

    /// Scroll to the active line even when the viewport is already past it
    #[arg(long)]
    pub always_scroll: bool,

    /// Simulate a measured layout with this many uniformly spaced lines
    #[arg(long, value_name = "N")]
    pub lines: Option<usize>,

    /// Line spacing of the simulated layout
    #[arg(long, default_value = "20.0")]
    pub line_height: f64,

    /// Print events as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// One tick's output, tagged with its playback time.
#[derive(Serialize)]
struct TickEvent<'a> {
    time: u64,
    #[serde(flatten)]
    output: &'a TickOutput,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = cuesync::config::load_config_with_precedence(args.config.clone())?;
        let merged = cuesync::config::merge_config(config_file);
        let with_env = cuesync::config::apply_env_overrides(merged);

        let policy_override = args
            .policy
            .as_deref()
            .and_then(|raw| raw.parse::<BoundaryPolicy>().ok());
        let display_override = args.mode.as_deref().map(|raw| match raw {
            "list" => DisplayMode::List,
            _ => DisplayMode::Paragraph,
        });
        let always_override = args.always_scroll.then_some(true);

        cuesync::config::apply_cli_overrides(
            with_env,
            policy_override,
            display_override,
            always_override,
        )
    };

    cuesync::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let source = SourceUrl::new(args.cues.to_string_lossy())?;
    let mut engine = SyncEngine::new(config.engine_config());

    // The first tick opens the fetch gate; the CLI serves it synchronously.
    if let Some(request) = engine.tick(args.from, &source).fetch {
        let cues = source::load(&FileFetcher::new(), &JsonCueParser, &request)?;
        engine.on_cues_loaded(&request, cues);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(lines) = args.lines {
        engine.on_layout_measured(LineLayoutSnapshot::uniform(lines, args.line_height));
    }

    for time in playback_times(&args, &engine) {
        let output = engine.tick(time, &source);
        if output.is_empty() {
            continue;
        }
        write_event(&mut out, time, &output, &engine, args.json)?;
    }

    if !args.json {
        writeln!(out)?;
        write_transcript(&mut out, &engine.render(), engine.config().display_mode)?;
    }

    Ok(())
}

/// Times to replay: explicit `--at` values, or a sweep over the cue range.
fn playback_times(args: &Args, engine: &SyncEngine) -> Vec<u64> {
    if !args.at.is_empty() {
        return args.at.clone();
    }
    let end = args.to.unwrap_or_else(|| {
        engine
            .store()
            .cues()
            .last()
            .map_or(args.from, |cue| cue.end_time)
    });
    let step = usize::try_from(args.step).unwrap_or(usize::MAX);
    (args.from..=end).step_by(step).collect()
}

fn write_event(
    out: &mut impl Write,
    time: u64,
    output: &TickOutput,
    engine: &SyncEngine,
    json: bool,
) -> io::Result<()> {
    if json {
        let line = serde_json::to_string(&TickEvent { time, output }).map_err(io::Error::other)?;
        return writeln!(out, "{}", line);
    }

    if let Some(change) = &output.change {
        let text = engine
            .store()
            .get(change.position)
            .map_or("", |cue| cue.text.as_str());
        writeln!(out, "{:>8} ms  active #{:<4} {}", time, change.sequence, text)?;
    }
    if let Some(scroll) = &output.scroll {
        writeln!(out, "{:>8} ms  scroll to {:.1}", time, scroll.offset)?;
    }
    Ok(())
}

fn write_transcript(
    out: &mut impl Write,
    segments: &[TranscriptSegment],
    mode: DisplayMode,
) -> io::Result<()> {
    match mode {
        DisplayMode::Paragraph => {
            for segment in segments {
                if segment.active {
                    write!(out, "[{}]", segment.text)?;
                } else {
                    write!(out, "{}", segment.text)?;
                }
            }
            writeln!(out)
        }
        DisplayMode::List => {
            for segment in segments {
                let marker = if segment.active { ">" } else { " " };
                writeln!(out, "{} {:>4}  {}", marker, segment.sequence, segment.text)?;
            }
            Ok(())
        }
    }
}
