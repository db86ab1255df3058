//! Plain-text presentation of the game for terminals.

use std::fmt::Write as _;

use walkie_core::{CellCoord, Effect, Event, Item, ObjectKind, PopoverKind, StageKind};
use walkie_system_catalog::Catalog;
use walkie_system_progression::{query, Game};
use walkie_world::Level;

/// Glyph drawn for the player.
const PLAYER: char = '@';

/// Draws the active stage.
pub(crate) fn stage(game: &Game) -> String {
    match query::stage(game) {
        StageKind::Playing => query::level(game).map(level).unwrap_or_default(),
        StageKind::Win => {
            let Some(win) = query::win(game) else {
                return String::new();
            };
            let mut text = format!("Level {} complete!\n", win.cleared());
            if win.continue_revealed() {
                let _ = match win.next() {
                    Some(next) => writeln!(text, "  next      play level {next}"),
                    None => writeln!(text, "  next      choose another level"),
                };
            }
            if win.browse_revealed() {
                text.push_str("  browse    pick any level\n");
            }
            text
        }
        StageKind::ChooseLevel => catalog_listing(query::catalog(game)),
    }
}

/// Draws a level with its legend.
pub(crate) fn level(level: &Level) -> String {
    let mut text = format!("{}  (score {})\n", level.name(), level.score());
    if let Some(caption) = level.caption() {
        text.push_str(caption);
        text.push('\n');
    }
    text.push_str(&board(level));
    let carry = level
        .player()
        .carry
        .map_or_else(|| "nothing".to_owned(), |item| describe_item(&item));
    let _ = writeln!(text, "carrying: {carry}");
    if let Some(popover) = level.popover() {
        let _ = match popover.kind() {
            PopoverKind::Request { wants } => {
                writeln!(text, "\"I would like {}.\"  (ok)", describe_item(&wants))
            }
            PopoverKind::Numpad => match level.objects().get(popover.object()) {
                Some(lock) => {
                    let at = lock.footprint.anchor();
                    writeln!(
                        text,
                        "Enter the code for the lock at ({}, {}).  (code N, ok)",
                        at.x(),
                        at.y()
                    )
                }
                None => writeln!(text, "Enter the code.  (code N, ok)"),
            },
        };
    }
    text
}

/// Draws the cells of a level, one row per line.
pub(crate) fn board(level: &Level) -> String {
    let width = usize::try_from(level.width()).unwrap_or_default();
    let height = usize::try_from(level.height()).unwrap_or_default();
    let mut text = String::with_capacity((width + 1) * height);
    for y in 0..level.height() {
        for x in 0..level.width() {
            let cell = CellCoord::new(to_i32(x), to_i32(y));
            text.push(glyph(level, cell));
        }
        text.push('\n');
    }
    text
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn glyph(level: &Level, cell: CellCoord) -> char {
    if level.player().cell == cell {
        return PLAYER;
    }
    let Some(index) = level.object_at(cell) else {
        return '.';
    };
    match &level.objects()[index].kind {
        ObjectKind::Target => '*',
        ObjectKind::Wall { backdrop: true, .. } => ':',
        ObjectKind::Wall { hp: Some(hp), .. } => char::from_digit((*hp).min(9), 10).unwrap_or('#'),
        ObjectKind::Wall { .. } => '#',
        ObjectKind::Lock { .. } => 'L',
        ObjectKind::Key => 'k',
        ObjectKind::Figure(_) => 'f',
        ObjectKind::Npc { .. } => 'N',
        ObjectKind::Door { .. } => 'D',
        ObjectKind::NumpadLock { .. } => 'P',
    }
}

fn describe_item(item: &Item) -> String {
    match item {
        Item::Key => "a key".to_owned(),
        Item::Figure(figure) => format!("a {} {}", figure.color, figure.shape.name()),
    }
}

/// One-line narration of an event, if it deserves one.
pub(crate) fn describe(event: &Event) -> Option<String> {
    let line = match event {
        Event::LevelStarted { id, generation } => {
            format!("level {id} started (attempt {generation})")
        }
        Event::CarryChanged { carry: Some(item) } => format!("you hold {}", describe_item(item)),
        Event::CarryChanged { carry: None } => "your hands are empty".to_owned(),
        Event::EffectDeclared { effect } => match effect {
            Effect::Shake => "bump.".to_owned(),
            Effect::Teleport { path } => {
                format!("whoosh, out at ({}, {})", path[3].x(), path[3].y())
            }
            Effect::CodeRejected => "wrong code.".to_owned(),
            Effect::Eat | Effect::Drop => return None,
        },
        Event::CodeAccepted => "the lock clicks open.".to_owned(),
        Event::LevelCleared { id, score } => format!("level {id} cleared with score {score}!"),
        Event::ContinueAvailable => "type `next` to continue.".to_owned(),
        Event::LevelBrowserAvailable => "type `browse` to pick a level.".to_owned(),
        Event::InputIgnored { reason } => format!("(ignored: {reason:?})"),
        _ => return None,
    };
    Some(line)
}

/// Lists the levels of a catalog.
pub(crate) fn catalog_listing(catalog: &Catalog) -> String {
    let mut text = String::from("Levels:\n");
    for template in catalog.templates() {
        let _ = writeln!(text, "  {:>4}  {}", template.id.as_str(), template.name);
    }
    text.push_str("type `play N` to start a level.\n");
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use walkie_core::{Command, Direction, LevelId};
    use walkie_system_progression::{apply, GameConfig};

    fn first_level() -> Level {
        let catalog = Catalog::builtin();
        let template = catalog.get(&LevelId::new("1")).expect("level 1");
        template
            .instantiate(1, &mut StepRng::new(0, 1))
            .expect("level builds")
    }

    #[test]
    fn first_level_board_shows_player_and_target() {
        let board = board(&first_level());
        let rows: Vec<&str> = board.lines().collect();
        assert_eq!(rows.len(), 7);
        assert!(rows.iter().all(|row| row.chars().count() == 7));
        assert_eq!(rows[3].chars().nth(2), Some('@'));
        assert_eq!(rows[3].chars().nth(4), Some('*'));
    }

    #[test]
    fn legend_names_the_carried_item() {
        assert!(level(&first_level()).contains("carrying: a key"));
    }

    #[test]
    fn numpad_popover_points_at_its_lock() {
        let mut events = Vec::new();
        let mut game = Game::launch(
            Catalog::builtin(),
            GameConfig::default(),
            &LevelId::new("15"),
            &mut events,
        )
        .expect("level starts");
        for _ in 0..2 {
            apply(
                &mut game,
                Command::Move {
                    direction: Direction::Up,
                },
                &mut events,
            )
            .expect("move applies");
        }
        let text = level(query::level(&game).expect("playing"));
        assert!(text.contains("Enter the code for the lock at (3, 3)."));
    }

    #[test]
    fn listing_names_every_level() {
        let listing = catalog_listing(&Catalog::builtin());
        assert!(listing.contains("   1  "));
        assert!(listing.contains("  32  "));
    }

    #[test]
    fn win_screen_reveals_its_options() {
        let mut events = Vec::new();
        let mut game = Game::launch(
            Catalog::builtin(),
            GameConfig::default(),
            &LevelId::new("1"),
            &mut events,
        )
        .expect("level starts");
        for _ in 0..2 {
            apply(
                &mut game,
                Command::Move {
                    direction: Direction::Right,
                },
                &mut events,
            )
            .expect("move applies");
        }
        assert!(events
            .iter()
            .filter_map(describe)
            .any(|line| line.contains("level 1 cleared")));
        assert!(!stage(&game).contains("next"));

        apply(
            &mut game,
            Command::Tick {
                dt: std::time::Duration::from_millis(600),
            },
            &mut events,
        )
        .expect("tick applies");
        assert!(stage(&game).contains("play level 2"));
    }
}
