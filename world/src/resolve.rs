//! Move resolver and popover actions.
//!
//! Every function borrows the authoritative level and returns the next level
//! inside a [`Resolution`]; the borrowed value is never modified.

use walkie_core::{
    CellCoord, Direction, Effect, GridObject, IgnoreReason, ObjectKind, PopoverKind, Timings,
};

use crate::{interact, Interaction, Level, PlayerState, Popover};

/// Next level value together with what the collaborator should present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Fully specified next level.
    pub level: Level,
    /// Animation hint, if any.
    pub effect: Option<Effect>,
    /// The last target was consumed.
    pub cleared: bool,
    /// Set when the input was ignored; `level` is then unchanged.
    pub ignored: Option<IgnoreReason>,
}

impl Resolution {
    fn settled(level: Level, effect: Option<Effect>) -> Self {
        Self {
            level,
            effect,
            cleared: false,
            ignored: None,
        }
    }

    fn ignored(level: &Level, reason: IgnoreReason) -> Self {
        Self {
            ignored: Some(reason),
            ..Self::settled(level.clone(), None)
        }
    }

    fn from_interaction(level: &Level, index: usize, interaction: Interaction) -> Self {
        let popover = interaction.popover.map(|request| Popover {
            kind: request.kind,
            object: index,
            opened_at: level.clock,
            pending: request.pending,
        });
        let next = Level {
            objects: interaction.objects,
            player: interaction.player,
            score: interaction.score,
            popover,
            ..level.clone()
        };
        Self {
            cleared: interaction.cleared,
            ..Self::settled(next, interaction.effect)
        }
    }
}

/// Outcome of a numpad submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeResolution {
    /// The submitted digits opened the lock.
    pub accepted: bool,
    /// Resulting level.
    pub resolution: Resolution,
}

/// Resolves a one-cell move of the player.
#[must_use]
pub fn resolve_move(level: &Level, direction: Direction) -> Resolution {
    resolve_position(level, level.player.cell.step(direction))
}

/// Resolves the player's attempt to enter `proposed`.
///
/// The cell is clamped onto the board first; a proposal that clamps back onto
/// the player's own cell is a no-op. Otherwise the first object covering the
/// clamped cell decides the outcome.
#[must_use]
pub fn resolve_position(level: &Level, proposed: CellCoord) -> Resolution {
    if level.pending_interaction() {
        return Resolution::ignored(level, IgnoreReason::PopoverPending);
    }

    let cell = proposed.clamped(level.width, level.height);
    if cell == level.player.cell {
        return Resolution::settled(level.clone(), None);
    }

    let next = PlayerState {
        cell,
        carry: level.player.carry,
    };
    let Some(index) = level.object_at(cell) else {
        tracing::debug!("level {}: player walks to {cell}", level.id);
        return Resolution::settled(
            Level {
                player: next,
                ..level.clone()
            },
            None,
        );
    };

    match interact(level, next, index) {
        Some(interaction) => {
            tracing::debug!(
                "level {}: player interacts with {} at {cell}",
                level.id,
                level.objects[index].kind.category().name()
            );
            Resolution::from_interaction(level, index, interaction)
        }
        None => Resolution::settled(level.clone(), None),
    }
}

/// Puts the carried item down on the player's cell.
#[must_use]
pub fn request_drop(level: &Level) -> Resolution {
    if level.pending_interaction() {
        return Resolution::ignored(level, IgnoreReason::PopoverPending);
    }
    let Some(item) = level.player.carry else {
        return Resolution::settled(level.clone(), None);
    };

    let mut next = level.clone();
    next.objects
        .push(GridObject::at(level.player.cell, item.into_object_kind()));
    next.player.carry = None;
    Resolution::settled(next, Some(Effect::Drop))
}

/// Submits digits to the open numpad popover.
#[must_use]
pub fn submit_code(level: &Level, digits: &str, timings: &Timings) -> CodeResolution {
    let rejected = |resolution| CodeResolution {
        accepted: false,
        resolution,
    };

    let Some(popover) = level
        .popover
        .filter(|popover| popover.kind == PopoverKind::Numpad)
    else {
        return rejected(Resolution::ignored(level, IgnoreReason::NoPopover));
    };
    if !popover.is_ready(level.clock, timings.input_cooldown) {
        return rejected(Resolution::ignored(level, IgnoreReason::CooldownActive));
    }

    let code = match level.objects.get(popover.object).map(|object| &object.kind) {
        Some(ObjectKind::NumpadLock { code }) => code,
        _ => {
            tracing::warn!(
                "level {}: numpad popover points at object {} which is not a numpad lock",
                level.id,
                popover.object
            );
            let closed = Level {
                popover: None,
                ..level.clone()
            };
            return rejected(Resolution::settled(closed, None));
        }
    };

    if digits.trim() != code.as_str() {
        tracing::debug!("level {}: numpad rejected the entered code", level.id);
        return rejected(Resolution::settled(
            level.clone(),
            Some(Effect::CodeRejected),
        ));
    }

    let mut objects = level.objects.clone();
    let _ = objects.remove(popover.object);
    let next = Level {
        objects,
        player: popover.pending,
        popover: None,
        ..level.clone()
    };
    CodeResolution {
        accepted: true,
        resolution: Resolution::settled(next, Some(Effect::Eat)),
    }
}

/// Closes the open popover once its cooldown has elapsed.
#[must_use]
pub fn dismiss_popover(level: &Level, timings: &Timings) -> Resolution {
    let Some(popover) = level.popover else {
        return Resolution::ignored(level, IgnoreReason::NoPopover);
    };
    if !popover.is_ready(level.clock, timings.input_cooldown) {
        return Resolution::ignored(level, IgnoreReason::CooldownActive);
    }
    Resolution::settled(
        Level {
            popover: None,
            ..level.clone()
        },
        None,
    )
}
