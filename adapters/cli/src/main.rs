#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots Maw: A Father's Quest.

mod logging;
mod tuning;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use maw_core::{AttackStyle, ControlState, Frame, LevelState, Tuning, GAME_TITLE};
use maw_rendering::{Color, Presentation, RenderingBackend, Scene};
use maw_rendering_macroquad::MacroquadBackend;
use maw_simulation::{
    run, Clock, FixedClock, FrameSink, MonotonicClock, RunSummary, Simulation,
};

/// Rescue the kitten: sewers, street, guards, key and boss.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file overriding tuned values.
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Seed for placement and wave randomness.
    #[arg(long)]
    seed: Option<u64>,
    /// Melee attack style.
    #[arg(long, value_enum)]
    attack_style: Option<StyleArg>,
    /// Run without a window; the player stands idle.
    #[arg(long)]
    headless: bool,
    /// Stop a headless run after this many ticks.
    #[arg(long, default_value_t = 600)]
    ticks: u64,
    /// Fixed tick length of a headless run, in milliseconds.
    #[arg(long, default_value_t = 16)]
    step_ms: u64,
    /// Measure wall time between headless ticks instead of a fixed step.
    #[arg(long)]
    realtime: bool,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    vsync: bool,
    /// Palette manifest for the windowed renderer.
    #[arg(long)]
    palette: Option<PathBuf>,
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StyleArg {
    FurBallFan,
    Claw,
}

impl From<StyleArg> for AttackStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::FurBallFan => Self::FurBallFan,
            StyleArg::Claw => Self::Claw,
        }
    }
}

/// Entry point for the Maw command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let tuning = resolve_tuning(&args)?;
    log::info!("{GAME_TITLE}");

    if args.headless {
        run_headless(&args, tuning);
        Ok(())
    } else {
        run_windowed(&args, tuning)
    }
}

fn resolve_tuning(args: &Args) -> Result<Tuning> {
    let mut tuning = match &args.tuning {
        Some(path) => tuning::load(path).context("could not load tuning")?,
        None => Tuning::default(),
    };
    if let Some(seed) = args.seed {
        tuning.seed = seed;
    }
    if let Some(style) = args.attack_style {
        tuning.melee.style = style.into();
    }
    Ok(tuning)
}

/// Remembers the last level seen and logs level changes.
#[derive(Debug)]
struct HeadlessSink {
    level: LevelState,
}

impl FrameSink for HeadlessSink {
    fn present(&mut self, frame: &Frame) {
        if frame.level != self.level {
            log::debug!("frame {}: now in {}", frame.tick, frame.level.name());
            self.level = frame.level;
        }
    }
}

fn run_headless(args: &Args, tuning: Tuning) {
    let mut simulation = Simulation::new(tuning);
    let mut sink = HeadlessSink {
        level: simulation.level(),
    };
    let mut clock: Box<dyn Clock> = if args.realtime {
        Box::new(MonotonicClock::new())
    } else {
        Box::new(FixedClock::new(Duration::from_millis(args.step_ms)))
    };

    let summary = run(
        &mut simulation,
        &ControlState::default(),
        clock.as_mut(),
        &mut sink,
        Some(args.ticks),
    );
    println!("{}", describe(&summary, sink.level));
}

fn describe(summary: &RunSummary, level: LevelState) -> String {
    let ending = summary
        .outcome
        .map_or_else(|| level.name().to_owned(), |outcome| outcome.message().to_owned());
    format!(
        "stopped after {} ticks ({:?}): {ending}",
        summary.ticks, summary.reason
    )
}

/// Runs the game in a window until the exit key or the window closes.
///
/// The backend owns the frame loop, so the window keeps presenting the last
/// frame and its outcome caption after the game ends. [`Simulation::step`]
/// only advances the clock from then on, which freezes the world and ignores
/// held keys.
fn run_windowed(args: &Args, tuning: Tuning) -> Result<()> {
    let mut simulation = Simulation::new(tuning);
    let scene = Scene::from_frame(&simulation.frame());
    let presentation = Presentation::new(GAME_TITLE, Color::from_rgb_u8(18, 20, 26), scene);

    let mut backend = MacroquadBackend::new().with_vsync(args.vsync);
    if let Some(palette) = &args.palette {
        backend = backend.with_palette_path(palette);
    }

    backend
        .run(presentation, move |dt, input, scene| {
            scene.camera.update(input.camera, dt);
            simulation.step(input.controls, dt);
            scene.apply_frame(&simulation.frame());
        })
        .context("rendering backend failed")
}
