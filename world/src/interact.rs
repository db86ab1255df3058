//! How each kind of grid object reacts when the player walks into it.

use walkie_core::{CellCoord, Effect, GridObject, Item, ObjectCategory, ObjectKind, PopoverKind};

use crate::{Level, PlayerState};

/// Complete next-state record produced by an interaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interaction {
    /// Object list after the interaction.
    pub objects: Vec<GridObject>,
    /// Player after the interaction.
    pub player: PlayerState,
    /// Score after the interaction.
    pub score: u32,
    /// Animation hint for the collaborator.
    pub effect: Option<Effect>,
    /// Popover to open, if the interaction needs more input.
    pub popover: Option<PopoverRequest>,
    /// The last target was consumed.
    pub cleared: bool,
}

/// Popover requested by an interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PopoverRequest {
    /// Kind of popover to open.
    pub kind: PopoverKind,
    /// Player state committed when the popover is solved.
    pub pending: PlayerState,
}

impl Interaction {
    fn blocked(level: &Level, effect: Option<Effect>) -> Self {
        Self {
            objects: level.objects().to_vec(),
            player: *level.player(),
            score: level.score(),
            effect,
            popover: None,
            cleared: false,
        }
    }

    fn removing(level: &Level, index: usize, player: PlayerState, effect: Effect) -> Self {
        let mut objects = level.objects().to_vec();
        let _ = objects.remove(index);
        Self {
            objects,
            player,
            score: level.score(),
            effect: Some(effect),
            popover: None,
            cleared: false,
        }
    }

    fn popover(level: &Level, kind: PopoverKind, pending: PlayerState) -> Self {
        Self {
            popover: Some(PopoverRequest { kind, pending }),
            ..Self::blocked(level, None)
        }
    }
}

/// Resolves a collision between the player and the object at `index`.
///
/// `next` is the tentative player state already holding the clamped cell.
/// Returns `None` when the object has no interaction capability, in which
/// case the move is simply blocked.
#[must_use]
pub fn interact(level: &Level, next: PlayerState, index: usize) -> Option<Interaction> {
    let object = level.objects().get(index)?;
    if !object.kind.interacts() {
        return None;
    }

    let interaction = match &object.kind {
        ObjectKind::Target => eat_target(level, next, index),
        ObjectKind::Wall { hp, .. } => hit_wall(level, *hp, index),
        ObjectKind::Lock { opens_with } => hand_over(level, next, index, *opens_with)
            .unwrap_or_else(|| Interaction::blocked(level, Some(Effect::Shake))),
        ObjectKind::Key | ObjectKind::Figure(_) => carry_item(level, next, index),
        ObjectKind::Npc { wants } => hand_over(level, next, index, *wants).unwrap_or_else(|| {
            Interaction::popover(
                level,
                PopoverKind::Request { wants: *wants },
                *level.player(),
            )
        }),
        ObjectKind::Door { out, exit } => pass_door(level, next.cell, *out, *exit),
        ObjectKind::NumpadLock { .. } => Interaction::popover(level, PopoverKind::Numpad, next),
    };
    Some(interaction)
}

fn eat_target(level: &Level, next: PlayerState, index: usize) -> Interaction {
    let mut interaction = Interaction::removing(level, index, next, Effect::Eat);
    interaction.score = level.score().saturating_add(1);
    interaction.cleared = !interaction
        .objects
        .iter()
        .any(|object| object.kind.category() == ObjectCategory::Target);
    interaction
}

fn hit_wall(level: &Level, hp: Option<u32>, index: usize) -> Interaction {
    let mut interaction = Interaction::blocked(level, Some(Effect::Shake));
    let Some(hp) = hp else {
        return interaction;
    };

    let remaining = hp.saturating_sub(1);
    if remaining == 0 {
        let _ = interaction.objects.remove(index);
    } else if let Some(ObjectKind::Wall { hp, .. }) = interaction
        .objects
        .get_mut(index)
        .map(|object| &mut object.kind)
    {
        *hp = Some(remaining);
    }
    interaction
}

/// Consumes the carried item when it matches what the object asks for.
fn hand_over(level: &Level, next: PlayerState, index: usize, wanted: Item) -> Option<Interaction> {
    if level.player().carry != Some(wanted) {
        return None;
    }
    Some(Interaction::removing(
        level,
        index,
        next.carrying(None),
        Effect::Eat,
    ))
}

fn carry_item(level: &Level, next: PlayerState, index: usize) -> Interaction {
    if level.player().carry.is_some() {
        return Interaction::blocked(level, Some(Effect::Shake));
    }
    let item = level.objects()[index].kind.as_item();
    Interaction::removing(level, index, next.carrying(item), Effect::Eat)
}

fn pass_door(level: &Level, door: CellCoord, out: CellCoord, exit: CellCoord) -> Interaction {
    let landing = exit.clamped(level.width(), level.height());
    if level.object_at(landing).is_some() {
        return Interaction::blocked(level, Some(Effect::Shake));
    }

    let from = level.player().cell;
    Interaction {
        player: PlayerState {
            cell: landing,
            carry: level.player().carry,
        },
        ..Interaction::blocked(
            level,
            Some(Effect::Teleport {
                path: [from, door, out, landing],
            }),
        )
    }
}
