#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state management for Walkie.
//!
//! A [`Level`] is an immutable-by-convention value: every resolver in
//! [`resolve`] borrows the current level and returns a fully specified next
//! level. The [`apply`] entry point wraps those resolvers for adapters that
//! prefer the command/event style, swapping the new value in atomically and
//! reporting what changed.

use std::time::Duration;

use thiserror::Error;
use walkie_core::{
    CellCoord, Command, Event, GridObject, Item, LevelId, ObjectCategory, PopoverKind, Timings,
};

pub mod interact;
pub mod resolve;

pub use interact::{interact, Interaction, PopoverRequest};
pub use resolve::{
    dismiss_popover, request_drop, resolve_move, resolve_position, submit_code, CodeResolution,
    Resolution,
};

/// Default edge length of a board cell in presentation units.
pub const DEFAULT_CELL_SIZE: u32 = 45;

/// Errors raised when a level layout cannot be instantiated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The board has no cells.
    #[error("level '{id}' has an empty {width}x{height} board")]
    EmptyBoard {
        /// Identifier of the offending level.
        id: LevelId,
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// The player would start outside the board.
    #[error("level '{id}' starts the player at {cell}, outside the {width}x{height} board")]
    PlayerOutOfBounds {
        /// Identifier of the offending level.
        id: LevelId,
        /// Requested start cell.
        cell: CellCoord,
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
}

/// Position and carry slot of the player token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlayerState {
    /// Cell occupied by the player.
    pub cell: CellCoord,
    /// Item held by the player, if any.
    pub carry: Option<Item>,
}

impl PlayerState {
    /// Creates an empty-handed player at the provided cell.
    #[must_use]
    pub const fn at(cell: CellCoord) -> Self {
        Self { cell, carry: None }
    }

    /// Returns the same player holding the provided item.
    #[must_use]
    pub const fn carrying(self, carry: Option<Item>) -> Self {
        Self {
            cell: self.cell,
            carry,
        }
    }
}

/// Static description of a level's board, used to instantiate a [`Level`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelLayout {
    /// Identifier of the level.
    pub id: LevelId,
    /// Human readable title.
    pub name: String,
    /// Optional text shown alongside the board.
    pub caption: Option<String>,
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    /// Edge length of a cell in presentation units.
    pub cell_size: u32,
    /// Starting player state.
    pub player: PlayerState,
}

/// Modal interaction opened by an NPC or a numpad lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Popover {
    kind: PopoverKind,
    object: usize,
    opened_at: Duration,
    pending: PlayerState,
}

impl Popover {
    /// Kind of popover.
    #[must_use]
    pub const fn kind(&self) -> PopoverKind {
        self.kind
    }

    /// Index of the object that opened the popover.
    #[must_use]
    pub const fn object(&self) -> usize {
        self.object
    }

    /// Reports whether the cooldown has elapsed at the provided clock reading.
    #[must_use]
    pub fn is_ready(&self, clock: Duration, cooldown: Duration) -> bool {
        clock.saturating_sub(self.opened_at) >= cooldown
    }
}

/// Mutable state of the active level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    id: LevelId,
    name: String,
    caption: Option<String>,
    width: u32,
    height: u32,
    cell_size: u32,
    score: u32,
    objects: Vec<GridObject>,
    player: PlayerState,
    popover: Option<Popover>,
    clock: Duration,
    generation: u64,
}

impl Level {
    /// Creates an empty level from its layout.
    pub fn new(layout: LevelLayout, generation: u64) -> Result<Self, LayoutError> {
        if layout.width == 0 || layout.height == 0 {
            return Err(LayoutError::EmptyBoard {
                id: layout.id,
                width: layout.width,
                height: layout.height,
            });
        }
        if !layout.player.cell.is_within(layout.width, layout.height) {
            return Err(LayoutError::PlayerOutOfBounds {
                id: layout.id,
                cell: layout.player.cell,
                width: layout.width,
                height: layout.height,
            });
        }

        Ok(Self {
            id: layout.id,
            name: layout.name,
            caption: layout.caption,
            width: layout.width,
            height: layout.height,
            cell_size: layout.cell_size,
            score: 0,
            objects: Vec::new(),
            player: layout.player,
            popover: None,
            clock: Duration::ZERO,
            generation,
        })
    }

    /// Identifier of the level.
    #[must_use]
    pub fn id(&self) -> &LevelId {
        &self.id
    }

    /// Human readable title.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text shown alongside the board, if any.
    #[must_use]
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// Replaces the caption; used by procedural loaders that reveal hints.
    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = Some(caption.into());
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Edge length of a cell in presentation units.
    #[must_use]
    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Number of targets consumed so far.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Objects on the board in scan order.
    #[must_use]
    pub fn objects(&self) -> &[GridObject] {
        &self.objects
    }

    /// Appends an object to the end of the scan order.
    pub fn push_object(&mut self, object: GridObject) {
        self.objects.push(object);
    }

    /// Player token.
    #[must_use]
    pub const fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Open popover, if any.
    #[must_use]
    pub const fn popover(&self) -> Option<&Popover> {
        self.popover.as_ref()
    }

    /// Reports whether a popover suspends movement input.
    #[must_use]
    pub const fn pending_interaction(&self) -> bool {
        self.popover.is_some()
    }

    /// Simulated time elapsed since the level started.
    #[must_use]
    pub const fn clock(&self) -> Duration {
        self.clock
    }

    /// Instance number assigned when the level started.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Index of the first object covering the cell.
    ///
    /// Earlier objects win when footprints overlap.
    #[must_use]
    pub fn object_at(&self, cell: CellCoord) -> Option<usize> {
        self.objects.iter().position(|object| object.covers(cell))
    }

    /// Counts objects of the provided category.
    #[must_use]
    pub fn count(&self, category: ObjectCategory) -> usize {
        self.objects
            .iter()
            .filter(|object| object.kind.category() == category)
            .count()
    }

    /// Counts targets left on the board.
    #[must_use]
    pub fn remaining_targets(&self) -> usize {
        self.count(ObjectCategory::Target)
    }
}

/// Summary of a command applied to a level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// The last target was consumed by this command.
    pub cleared: bool,
}

/// Applies the provided command to the level, replacing it with the resolved value.
///
/// Progression commands (`Continue`, `BrowseLevels`, `OpenLevelChooser`,
/// `ChooseLevel`, `Restart`) do not concern a single level and are ignored.
pub fn apply(
    level: &mut Level,
    command: Command,
    timings: &Timings,
    out_events: &mut Vec<Event>,
) -> Outcome {
    match command {
        Command::Tick { dt } => {
            let was_ready = level
                .popover
                .map(|popover| popover.is_ready(level.clock, timings.input_cooldown));
            level.clock = level.clock.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });

            if let (Some(false), Some(popover)) = (was_ready, level.popover) {
                if popover.is_ready(level.clock, timings.input_cooldown) {
                    out_events.push(Event::PopoverReady);
                }
            }
            Outcome::default()
        }
        Command::Move { direction } => {
            let resolution = resolve_move(level, direction);
            commit(level, resolution, out_events)
        }
        Command::Drop => {
            let resolution = request_drop(level);
            commit(level, resolution, out_events)
        }
        Command::SubmitCode { digits } => {
            let code = submit_code(level, &digits, timings);
            let outcome = commit(level, code.resolution, out_events);
            if code.accepted {
                out_events.push(Event::CodeAccepted);
            }
            outcome
        }
        Command::DismissPopover => {
            let resolution = dismiss_popover(level, timings);
            commit(level, resolution, out_events)
        }
        Command::Continue
        | Command::BrowseLevels
        | Command::OpenLevelChooser
        | Command::ChooseLevel { .. }
        | Command::Restart => Outcome::default(),
    }
}

fn commit(level: &mut Level, resolution: Resolution, out_events: &mut Vec<Event>) -> Outcome {
    if let Some(reason) = resolution.ignored {
        tracing::debug!("level {}: input ignored ({reason:?})", level.id);
        out_events.push(Event::InputIgnored { reason });
        return Outcome::default();
    }

    let next = resolution.level;
    if next.player.cell != level.player.cell {
        out_events.push(Event::PlayerMoved {
            from: level.player.cell,
            to: next.player.cell,
        });
    }
    if next.player.carry != level.player.carry {
        out_events.push(Event::CarryChanged {
            carry: next.player.carry,
        });
    }
    if next.score != level.score {
        out_events.push(Event::ScoreChanged { score: next.score });
    }
    match (&level.popover, &next.popover) {
        (None, Some(popover)) => out_events.push(Event::PopoverOpened {
            popover: popover.kind,
        }),
        (Some(_), None) => out_events.push(Event::PopoverClosed),
        _ => {}
    }
    if let Some(effect) = resolution.effect {
        out_events.push(Event::EffectDeclared { effect });
    }
    if resolution.cleared {
        tracing::info!("level {} cleared with score {}", next.id, next.score);
        out_events.push(Event::LevelCleared {
            id: next.id.clone(),
            score: next.score,
        });
    }

    *level = next;
    Outcome {
        cleared: resolution.cleared,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use walkie_core::{Direction, Effect, ObjectKind};

    fn layout(width: u32, height: u32, start: CellCoord) -> LevelLayout {
        LevelLayout {
            id: LevelId::new("t"),
            name: "test".to_owned(),
            caption: None,
            width,
            height,
            cell_size: DEFAULT_CELL_SIZE,
            player: PlayerState::at(start),
        }
    }

    #[test]
    fn new_rejects_empty_board() {
        let error = Level::new(layout(0, 7, CellCoord::new(0, 0)), 1).unwrap_err();
        assert!(matches!(error, LayoutError::EmptyBoard { width: 0, .. }));
    }

    #[test]
    fn new_rejects_player_outside_board() {
        let error = Level::new(layout(7, 7, CellCoord::new(7, 3)), 1).unwrap_err();
        assert!(matches!(error, LayoutError::PlayerOutOfBounds { .. }));
    }

    #[test]
    fn apply_reports_movement_and_effects() {
        let mut level = Level::new(layout(7, 7, CellCoord::new(2, 3)), 1).expect("layout");
        level.push_object(GridObject::at(CellCoord::new(4, 3), ObjectKind::Target));
        level.push_object(GridObject::at(CellCoord::new(2, 2), ObjectKind::WALL));
        let timings = Timings::default();

        let mut events = Vec::new();
        let outcome = apply(
            &mut level,
            Command::Move {
                direction: Direction::Up,
            },
            &timings,
            &mut events,
        );
        assert!(!outcome.cleared);
        assert_eq!(
            events,
            vec![Event::EffectDeclared {
                effect: Effect::Shake
            }]
        );

        events.clear();
        for _ in 0..2 {
            let _ = apply(
                &mut level,
                Command::Move {
                    direction: Direction::Right,
                },
                &timings,
                &mut events,
            );
        }
        assert!(events.contains(&Event::ScoreChanged { score: 1 }));
        assert!(events.contains(&Event::LevelCleared {
            id: LevelId::new("t"),
            score: 1,
        }));
        assert_eq!(level.player().cell, CellCoord::new(4, 3));
    }

    #[test]
    fn tick_advances_clock_without_popover_events() {
        let mut level = Level::new(layout(7, 7, CellCoord::new(0, 0)), 1).expect("layout");
        let mut events = Vec::new();
        let _ = apply(
            &mut level,
            Command::Tick {
                dt: Duration::from_millis(250),
            },
            &Timings::default(),
            &mut events,
        );
        assert_eq!(level.clock(), Duration::from_millis(250));
        assert_eq!(
            events,
            vec![Event::TimeAdvanced {
                dt: Duration::from_millis(250)
            }]
        );
    }
}
