#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Progression controller for Walkie.
//!
//! [`Game`] owns the catalog, the active [`Stage`] and the random number
//! generator feeding procedural levels. Every input flows through [`apply`],
//! which resolves it completely, including any level transition, before
//! returning.

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use walkie_core::{Command, Event, IgnoreReason, LevelId, StageKind, Timings};
use walkie_system_catalog::{Catalog, CatalogError, LevelTemplate};
use walkie_world::Level;

pub mod deep_link;

pub use deep_link::{location_for, resolve_deep_link};

/// Errors raised while moving between levels.
#[derive(Debug, Error)]
pub enum ProgressionError {
    /// The catalog could not provide or build the requested level.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Tunables of a game session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameConfig {
    /// Delays gating popovers and the win interstitial.
    pub timings: Timings,
    /// Seed of the random number generator; `None` draws one from the OS.
    pub seed: Option<u64>,
}

/// State of the win interstitial.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WinState {
    cleared: LevelId,
    next: Option<LevelId>,
    entered_at: Duration,
    continue_revealed: bool,
    browse_revealed: bool,
}

impl WinState {
    /// Level that was just cleared.
    #[must_use]
    pub fn cleared(&self) -> &LevelId {
        &self.cleared
    }

    /// Level started by [`Command::Continue`]; `None` opens the chooser.
    #[must_use]
    pub fn next(&self) -> Option<&LevelId> {
        self.next.as_ref()
    }

    /// The continue action has been offered.
    #[must_use]
    pub const fn continue_revealed(&self) -> bool {
        self.continue_revealed
    }

    /// The level browser has been offered.
    #[must_use]
    pub const fn browse_revealed(&self) -> bool {
        self.browse_revealed
    }
}

/// What the player is currently looking at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    /// A level is being played.
    Playing(Level),
    /// The win interstitial is shown.
    Win(WinState),
    /// The level chooser is shown.
    ChooseLevel,
}

impl Stage {
    /// Coarse kind of the stage.
    #[must_use]
    pub const fn kind(&self) -> StageKind {
        match self {
            Self::Playing(_) => StageKind::Playing,
            Self::Win(_) => StageKind::Win,
            Self::ChooseLevel => StageKind::ChooseLevel,
        }
    }
}

/// Where a level comes from when it is started.
#[derive(Clone, Debug)]
pub enum LevelSource {
    /// A catalog level.
    Id(LevelId),
    /// An ad hoc template that is not part of the catalog.
    Template(LevelTemplate),
}

/// Game session.
#[derive(Debug)]
pub struct Game {
    catalog: Catalog,
    rng: ChaCha8Rng,
    timings: Timings,
    stage: Stage,
    current: Option<LevelTemplate>,
    clock: Duration,
    generation: u64,
    location: Option<String>,
}

impl Game {
    /// Creates a session showing the level chooser.
    #[must_use]
    pub fn new(catalog: Catalog, config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            catalog,
            rng,
            timings: config.timings,
            stage: Stage::ChooseLevel,
            current: None,
            clock: Duration::ZERO,
            generation: 0,
            location: None,
        }
    }

    /// Creates a session and immediately starts the provided catalog level.
    pub fn launch(
        catalog: Catalog,
        config: GameConfig,
        first: &LevelId,
        out_events: &mut Vec<Event>,
    ) -> Result<Self, ProgressionError> {
        let mut game = Self::new(catalog, config);
        game.start_level(LevelSource::Id(first.clone()), out_events)?;
        Ok(game)
    }

    /// Starts a level from scratch, replacing whatever stage is active.
    pub fn start_level(
        &mut self,
        source: LevelSource,
        out_events: &mut Vec<Event>,
    ) -> Result<(), ProgressionError> {
        let template = match source {
            LevelSource::Id(id) => self.catalog.get(&id)?.clone(),
            LevelSource::Template(template) => template,
        };
        let generation = self.generation + 1;
        let level = template.instantiate(generation, &mut self.rng)?;

        tracing::info!(
            "starting level {} ({}) as instance {generation}",
            template.id,
            template.name
        );
        self.generation = generation;
        out_events.push(Event::LevelStarted {
            id: template.id.clone(),
            generation,
        });
        self.location = location_for(level.id());
        self.stage = Stage::Playing(level);
        self.current = Some(template);
        out_events.push(Event::StageChanged {
            stage: StageKind::Playing,
        });
        out_events.push(Event::LocationChanged {
            location: self.location.clone(),
        });
        Ok(())
    }

    fn open_chooser(&mut self, out_events: &mut Vec<Event>) {
        tracing::info!("opening the level chooser");
        self.stage = Stage::ChooseLevel;
        self.location = None;
        out_events.push(Event::StageChanged {
            stage: StageKind::ChooseLevel,
        });
        out_events.push(Event::LocationChanged { location: None });
    }

    fn enter_win(&mut self, cleared: LevelId, out_events: &mut Vec<Event>) {
        let next = match self.catalog.next_after(&cleared) {
            Ok(next) => next.cloned(),
            Err(error) => {
                tracing::debug!("{error}; the win screen leads to the chooser");
                None
            }
        };
        tracing::info!(
            "level {cleared} won, next: {}",
            next.as_ref().map_or("level chooser", LevelId::as_str)
        );
        self.stage = Stage::Win(WinState {
            cleared,
            next,
            entered_at: self.clock,
            continue_revealed: false,
            browse_revealed: false,
        });
        self.location = None;
        out_events.push(Event::StageChanged {
            stage: StageKind::Win,
        });
        out_events.push(Event::LocationChanged { location: None });
    }

    fn since(&self, instant: Duration) -> Duration {
        self.clock.saturating_sub(instant)
    }
}

/// Applies a command to the game.
///
/// Inputs that do not fit the active stage, or arrive before their gate
/// opens, are reported as [`Event::InputIgnored`] and change nothing.
pub fn apply(
    game: &mut Game,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), ProgressionError> {
    match command {
        Command::Tick { dt } => {
            tick(game, dt, out_events);
            Ok(())
        }
        Command::Move { .. }
        | Command::Drop
        | Command::SubmitCode { .. }
        | Command::DismissPopover => {
            play(game, command, out_events);
            Ok(())
        }
        Command::Continue => {
            let Stage::Win(win) = &game.stage else {
                ignore(out_events, IgnoreReason::WrongStage);
                return Ok(());
            };
            if game.since(win.entered_at) < game.timings.input_cooldown {
                ignore(out_events, IgnoreReason::CooldownActive);
                return Ok(());
            }
            match win.next.clone() {
                Some(next) => game.start_level(LevelSource::Id(next), out_events),
                None => {
                    game.open_chooser(out_events);
                    Ok(())
                }
            }
        }
        Command::BrowseLevels => {
            let ready = match &game.stage {
                Stage::Win(win) => Some(game.since(win.entered_at) >= game.timings.browse_delay),
                _ => None,
            };
            match ready {
                Some(true) => game.open_chooser(out_events),
                Some(false) => ignore(out_events, IgnoreReason::CooldownActive),
                None => ignore(out_events, IgnoreReason::WrongStage),
            }
            Ok(())
        }
        Command::OpenLevelChooser => {
            game.open_chooser(out_events);
            Ok(())
        }
        Command::ChooseLevel { id } => game.start_level(LevelSource::Id(id), out_events),
        Command::Restart => {
            let template = match &game.stage {
                Stage::Playing(_) => game.current.clone(),
                _ => None,
            };
            match template {
                Some(template) => game.start_level(LevelSource::Template(template), out_events),
                None => {
                    ignore(out_events, IgnoreReason::WrongStage);
                    Ok(())
                }
            }
        }
    }
}

fn tick(game: &mut Game, dt: Duration, out_events: &mut Vec<Event>) {
    game.clock = game.clock.saturating_add(dt);
    let timings = game.timings;
    let clock = game.clock;
    match &mut game.stage {
        Stage::Playing(level) => {
            let _ = walkie_world::apply(level, Command::Tick { dt }, &timings, out_events);
        }
        Stage::Win(win) => {
            out_events.push(Event::TimeAdvanced { dt });
            let elapsed = clock.saturating_sub(win.entered_at);
            if !win.continue_revealed && elapsed >= timings.input_cooldown {
                win.continue_revealed = true;
                out_events.push(Event::ContinueAvailable);
            }
            if !win.browse_revealed && elapsed >= timings.browse_delay {
                win.browse_revealed = true;
                out_events.push(Event::LevelBrowserAvailable);
            }
        }
        Stage::ChooseLevel => out_events.push(Event::TimeAdvanced { dt }),
    }
}

fn play(game: &mut Game, command: Command, out_events: &mut Vec<Event>) {
    let Stage::Playing(level) = &mut game.stage else {
        ignore(out_events, IgnoreReason::WrongStage);
        return;
    };
    let outcome = walkie_world::apply(level, command, &game.timings, out_events);
    if outcome.cleared {
        let cleared = level.id().clone();
        game.enter_win(cleared, out_events);
    }
}

fn ignore(out_events: &mut Vec<Event>, reason: IgnoreReason) {
    tracing::debug!("input ignored: {reason:?}");
    out_events.push(Event::InputIgnored { reason });
}

/// Read-only accessors over a [`Game`].
pub mod query {
    use std::time::Duration;

    use walkie_core::{StageKind, Timings};
    use walkie_system_catalog::Catalog;
    use walkie_world::Level;

    use super::{Game, Stage, WinState};

    /// Coarse kind of the active stage.
    #[must_use]
    pub fn stage(game: &Game) -> StageKind {
        game.stage.kind()
    }

    /// Level being played, if any.
    #[must_use]
    pub fn level(game: &Game) -> Option<&Level> {
        match &game.stage {
            Stage::Playing(level) => Some(level),
            _ => None,
        }
    }

    /// Win interstitial state, if shown.
    #[must_use]
    pub fn win(game: &Game) -> Option<&WinState> {
        match &game.stage {
            Stage::Win(win) => Some(win),
            _ => None,
        }
    }

    /// Navigable path of the active level.
    #[must_use]
    pub fn location(game: &Game) -> Option<&str> {
        game.location.as_deref()
    }

    /// Instance number of the most recently started level.
    #[must_use]
    pub fn generation(game: &Game) -> u64 {
        game.generation
    }

    /// Total simulated time of the session.
    #[must_use]
    pub fn clock(game: &Game) -> Duration {
        game.clock
    }

    /// Delays in effect for the session.
    #[must_use]
    pub fn timings(game: &Game) -> Timings {
        game.timings
    }

    /// Catalog backing the session.
    #[must_use]
    pub fn catalog(game: &Game) -> &Catalog {
        &game.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use walkie_core::Direction;

    fn game_at(id: &str) -> (Game, Vec<Event>) {
        let mut events = Vec::new();
        let game = Game::launch(
            Catalog::builtin(),
            GameConfig {
                seed: Some(7),
                ..GameConfig::default()
            },
            &LevelId::new(id),
            &mut events,
        )
        .expect("level starts");
        (game, events)
    }

    #[test]
    fn launch_reports_start_and_location() {
        let (game, events) = game_at("3");
        assert_eq!(
            events,
            vec![
                Event::LevelStarted {
                    id: LevelId::new("3"),
                    generation: 1,
                },
                Event::StageChanged {
                    stage: StageKind::Playing,
                },
                Event::LocationChanged {
                    location: Some("/3".to_owned()),
                },
            ]
        );
        assert_eq!(query::location(&game), Some("/3"));
    }

    #[test]
    fn movement_outside_playing_is_ignored() {
        let mut game = Game::new(Catalog::builtin(), GameConfig::default());
        let mut events = Vec::new();
        apply(
            &mut game,
            Command::Move {
                direction: Direction::Up,
            },
            &mut events,
        )
        .expect("ignored inputs are not errors");
        assert_eq!(
            events,
            vec![Event::InputIgnored {
                reason: IgnoreReason::WrongStage,
            }]
        );
    }

    #[test]
    fn terminal_level_leads_to_the_chooser() {
        let (mut game, _) = game_at("32");
        let mut events = Vec::new();
        game.enter_win(LevelId::new("32"), &mut events);
        assert_eq!(query::win(&game).and_then(WinState::next), None);

        apply(
            &mut game,
            Command::Tick {
                dt: Duration::from_millis(600),
            },
            &mut events,
        )
        .expect("tick");
        apply(&mut game, Command::Continue, &mut events).expect("continue");
        assert_eq!(query::stage(&game), StageKind::ChooseLevel);
        assert_eq!(query::location(&game), None);
    }
}
