#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line driver for the Tallgrass engine.
//!
//! Generates (or loads) a board, feeds a scripted key sequence to the player
//! and prints what the player sees after every tick.

mod script;
mod settings;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tallgrass_core::{ActorId, Event};
use tallgrass_rendering::{Frame, FrameSink, TextSink};
use tallgrass_system_bootstrap::Bootstrap;
use tallgrass_system_turns::{TickOutcome, Turns};
use tallgrass_world::{ActorSeed, Board, BoardConfig};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use settings::Settings;

const PLAYER_NAME: &str = "Red";
const PLAYER_HP: i32 = 20;
const PLAYER_SPEED: f64 = 1.0;

#[derive(Debug, Parser)]
#[command(name = "tallgrass")]
#[command(about = "Runs the Tallgrass visibility and turn engine headlessly", version)]
struct Args {
    /// Seed for world generation and random walks
    #[arg(long)]
    seed: Option<u64>,

    /// Side length of the generated board
    #[arg(long)]
    size: Option<i32>,

    /// Maximum number of ticks to run
    #[arg(long, default_value_t = 1)]
    ticks: u32,

    /// Keys fed to the player, e.g. "hjkl."
    #[arg(long, default_value = "")]
    inputs: String,

    /// Text layout to load instead of generating a board
    #[arg(long)]
    map: Option<PathBuf>,

    /// TOML file with [board], [turns] and [world] sections
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .with_context(|| format!("invalid log level `{}`", args.log_level))?;
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        settings.world.seed = seed;
    }
    if let Some(size) = args.size {
        settings.world.size = size;
    }

    let (mut board, player) = match &args.map {
        Some(path) => load_map(path, settings.board)?,
        None => {
            let generated = Bootstrap::new(settings.world)
                .generate(settings.board)
                .context("failed to generate world")?;
            (generated.board, generated.player)
        }
    };

    let mut turns = Turns::new(settings.turns, settings.world.seed);
    for input in script::parse_inputs(&args.inputs) {
        turns.push_input(input);
    }

    let stdout = io::stdout();
    let mut sink = TextSink::new(stdout.lock());
    sink.present(&Frame::capture(&board, player))?;

    let mut events = Vec::new();
    for tick in 0..args.ticks {
        events.clear();
        let outcome = turns.tick(&mut board, &mut events);
        debug!(tick, ?outcome, events = events.len(), "tick finished");
        log_player_events(&events, player);
        sink.present(&Frame::capture(&board, player))?;

        let starved =
            outcome == TickOutcome::AwaitingInput && turns.pending_inputs().is_empty();
        if starved || outcome == TickOutcome::NoActors {
            break;
        }
    }

    info!(
        frames = sink.frames(),
        recomputations = board.vision_recomputations(),
        "run complete"
    );
    Ok(())
}

fn load_map(path: &Path, config: BoardConfig) -> Result<(Board, ActorId)> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read map at {}", path.display()))?;
    let layout = Board::from_ascii(&text, config)
        .with_context(|| format!("failed to parse map at {}", path.display()))?;

    let mut spawns = layout.spawns.into_iter();
    let Some(start) = spawns.next() else {
        bail!("map at {} has no '@' spawn marker", path.display());
    };
    let extra = spawns.count();
    if extra > 0 {
        warn!(extra, "ignoring additional spawn markers");
    }

    let mut board = layout.board;
    let player = board.add_actor(ActorSeed::trainer(
        PLAYER_NAME,
        start,
        true,
        PLAYER_HP,
        PLAYER_SPEED,
    ));
    Ok((board, player))
}

fn log_player_events(events: &[Event], player: ActorId) {
    for event in events {
        if let Event::ActorActed {
            actor,
            action,
            success,
        } = event
        {
            if *actor == player {
                info!(?action, success, "player acted");
            }
        }
    }
}
