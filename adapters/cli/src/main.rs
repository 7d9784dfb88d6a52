#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Office Pranksters experience.

mod config;
mod headless;
mod logging;
mod scene;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use pranksters_core::{AudioCue, AudioFeedback, LevelId, Tuning, WELCOME_BANNER};
use pranksters_rendering::{Color, PlayAreaPresentation, Presentation, RenderingBackend, Scene};
use pranksters_rendering_macroquad::{MacroquadBackend, Theme};
use pranksters_session::Campaign;
use tracing::{debug, info};

use self::headless::{run_headless, HeadlessRun};

const FLOOR_COLOR: Color = Color::new(0.176, 0.176, 0.176, 1.0);
const CLEAR_COLOR: Color = Color::new(0.0, 0.0, 0.0, 1.0);
const MAX_FRAME: Duration = Duration::from_millis(100);

/// Two office interns, one guard, five pranks.
#[derive(Debug, Parser)]
#[command(name = "office-pranksters", version, about, long_about = None)]
struct Args {
    /// Start directly at this level instead of the title screen.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    level: Option<u8>,
    /// Run the simulation without opening a window.
    #[arg(long)]
    headless: bool,
    /// Number of ticks simulated in headless mode.
    #[arg(long, default_value_t = 600)]
    frames: u32,
    /// Length of one headless tick in milliseconds.
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
    frame_ms: u64,
    /// Print the headless summary as JSON.
    #[arg(long)]
    json: bool,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long)]
    vsync: bool,
    /// Print frame timing once per second.
    #[arg(long)]
    show_fps: bool,
    /// TOML file overriding gameplay tuning.
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// TOML file overriding the color theme.
    #[arg(long)]
    theme: Option<PathBuf>,
    /// Seed for the cosmetic alarm flash.
    #[arg(long)]
    seed: Option<u64>,
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Logs cues in place of an audio device.
#[derive(Debug, Default)]
struct TracingAudio;

impl AudioFeedback for TracingAudio {
    fn play(&mut self, cue: AudioCue) {
        debug!(?cue, "audio cue");
    }
}

/// Entry point for the Office Pranksters command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(args.verbose)?;

    let tuning = config::load_tuning(args.tuning.as_deref())?;
    let level = args.level.and_then(LevelId::from_number);

    if args.headless {
        let summary = run_headless(
            tuning,
            HeadlessRun {
                level: level.unwrap_or_else(LevelId::first),
                frames: args.frames,
                frame: Duration::from_millis(args.frame_ms),
                seed: args.seed,
            },
        );
        if args.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).context("failed to encode run summary")?
            );
        } else {
            println!("{summary}");
        }
        return Ok(());
    }

    let theme = match &args.theme {
        Some(path) => Theme::from_path(path)?,
        None => Theme::default(),
    };
    run_windowed(tuning, level, args.seed, theme, &args)
}

fn run_windowed(
    tuning: Tuning,
    level: Option<LevelId>,
    seed: Option<u64>,
    theme: Theme,
    args: &Args,
) -> Result<()> {
    let play_area = PlayAreaPresentation::new(
        tuning.play_area_width,
        tuning.play_area_height,
        FLOOR_COLOR,
    )?;

    let mut campaign = Campaign::new(tuning, TracingAudio);
    if let Some(seed) = seed {
        campaign = campaign.with_seed(seed);
    }
    if let Some(level) = level {
        campaign.start_at(level);
    }

    let mut scene = Scene::new(play_area);
    scene::populate_scene(&campaign, &mut scene);
    info!(banner = WELCOME_BANNER, "opening window");

    MacroquadBackend::new()
        .with_vsync(args.vsync)
        .with_show_fps(args.show_fps)
        .with_theme(theme)
        .run(
            Presentation::new(WELCOME_BANNER, CLEAR_COLOR, scene),
            move |dt, input, scene| {
                campaign.step(dt.min(MAX_FRAME), &input.to_input_snapshot());
                scene::populate_scene(&campaign, scene);
            },
        )
}
