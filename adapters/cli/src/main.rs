#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Walkie in a terminal.

mod config;
mod input;
mod render;

use std::{
    fs::{self, File},
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use walkie_core::{Command, Event, LevelId, WELCOME_BANNER};
use walkie_system_catalog::Catalog;
use walkie_system_progression::{apply, deep_link::resolve_deep_link, query, Game, GameConfig};

use crate::{config::FileConfig, input::Input};

/// Walk the grid, carry one thing at a time, clear every target.
#[derive(Debug, Parser)]
#[command(name = "walkie", author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Level to start with, by identifier or path such as `/7`.
    #[arg(short, long)]
    level: Option<String>,

    /// Seed for randomised levels (default: random).
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON level pack appended to the built-in levels.
    #[arg(long = "levels", value_name = "PACK")]
    level_pack: Option<PathBuf>,

    /// Reads commands from a file instead of stdin; time only passes on `wait`.
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Prints the available levels and exits.
    #[arg(long)]
    list: bool,

    /// Logs debug details to stderr.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only logs warnings and errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::WARN
        } else {
            Level::INFO
        }
    }
}

/// How the session clock advances.
#[derive(Clone, Copy, Debug)]
enum Pace {
    /// Wall-clock time elapsed between input lines.
    RealTime(Instant),
    /// Only explicit `wait` lines; errors end the run.
    Scripted,
}

/// Entry point for the Walkie command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level())?;

    let file = match &cli.config {
        Some(path) => config::load(path)?,
        None => FileConfig::default(),
    };
    let pack = cli.level_pack.as_deref().or(file.level_pack.as_deref());
    let catalog = load_catalog(pack)?;
    if cli.list {
        print!("{}", render::catalog_listing(&catalog));
        return Ok(());
    }

    let config = GameConfig {
        timings: file.timings,
        seed: cli.seed.or(file.seed),
    };
    let first = match cli.level.as_deref().or(file.start_level.as_deref()) {
        Some(requested) => Some(level_id(requested, &catalog)),
        None => catalog.first().cloned(),
    };

    println!("{WELCOME_BANNER}");
    let mut events = Vec::new();
    let game = match first {
        Some(first) => Game::launch(catalog, config, &first, &mut events)
            .with_context(|| format!("failed to start level {first}"))?,
        None => Game::new(catalog, config),
    };
    narrate(&events);

    match &cli.script {
        Some(path) => {
            let script = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            run(game, BufReader::new(script), Pace::Scripted)
        }
        None => run(game, io::stdin().lock(), Pace::RealTime(Instant::now())),
    }
}

/// Sends diagnostics to stderr so they never mix with the board; `RUST_LOG`
/// overrides the level chosen on the command line.
fn init_tracing(level: Level) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|error| anyhow!("failed to install the tracing subscriber: {error}"))
}

fn load_catalog(pack: Option<&Path>) -> Result<Catalog> {
    let catalog = Catalog::builtin();
    let Some(path) = pack else {
        return Ok(catalog);
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read level pack {}", path.display()))?;
    let catalog = catalog
        .with_pack_json(&json)
        .with_context(|| format!("invalid level pack {}", path.display()))?;
    tracing::info!("{} levels available", catalog.len());
    Ok(catalog)
}

/// Accepts `/7`, `07` or any raw identifier; unknown names fail when started.
fn level_id(requested: &str, catalog: &Catalog) -> LevelId {
    resolve_deep_link(requested, catalog)
        .unwrap_or_else(|| LevelId::new(requested.trim().trim_start_matches('/')))
}

fn run(mut game: Game, lines: impl BufRead, mut pace: Pace) -> Result<()> {
    print!("{}", render::stage(&game));
    for (index, line) in lines.lines().enumerate() {
        let line = line.context("failed to read input")?;
        if let Pace::RealTime(last) = &mut pace {
            let now = Instant::now();
            let elapsed = now.saturating_duration_since(*last);
            *last = now;
            step(&mut game, Command::Tick { dt: elapsed }, false)?;
        }

        let outcome = input::parse(&line).and_then(|input| handle(&mut game, input));
        match (outcome, pace) {
            (Ok(true), _) => {}
            (Ok(false), _) => break,
            (Err(error), Pace::Scripted) => {
                return Err(error.context(format!("script line {}", index + 1)));
            }
            (Err(error), Pace::RealTime(_)) => eprintln!("{error:#}"),
        }
    }
    Ok(())
}

/// Executes one input; returns `false` once the player quits.
fn handle(game: &mut Game, input: Input) -> Result<bool> {
    match input {
        Input::Command(command) => step(game, command, true)?,
        Input::Choose(requested) => {
            let id = level_id(&requested, query::catalog(game));
            step(game, Command::ChooseLevel { id }, true)?;
        }
        Input::Wait(dt) => step(game, Command::Tick { dt }, true)?,
        Input::Show => print!("{}", render::stage(game)),
        Input::Help => println!("{}", input::HELP),
        Input::Quit => return Ok(false),
    }
    Ok(true)
}

/// Applies a command, narrates its events and redraws after visible changes.
fn step(game: &mut Game, command: Command, redraw: bool) -> Result<()> {
    let mut events = Vec::new();
    let result = apply(game, command, &mut events);
    narrate(&events);
    result?;
    if redraw && events.iter().any(changes_view) {
        print!("{}", render::stage(game));
    }
    Ok(())
}

fn narrate(events: &[Event]) {
    for line in events.iter().filter_map(render::describe) {
        println!("{line}");
    }
}

fn changes_view(event: &Event) -> bool {
    !matches!(
        event,
        Event::InputIgnored { .. } | Event::TimeAdvanced { .. } | Event::PopoverReady
    )
}
