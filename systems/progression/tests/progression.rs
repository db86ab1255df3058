use std::time::Duration;

use walkie_core::{
    CellCoord, Command, Direction, Effect, Event, IgnoreReason, Item, LevelId, ObjectKind,
    StageKind,
};
use walkie_system_catalog::{Catalog, CatalogError, LevelTemplate, OnLoad, Placement};
use walkie_system_progression::{apply, query, Game, GameConfig, LevelSource, ProgressionError};

fn launch(id: &str) -> Game {
    let mut events = Vec::new();
    Game::launch(
        Catalog::builtin(),
        GameConfig {
            seed: Some(42),
            ..GameConfig::default()
        },
        &LevelId::new(id),
        &mut events,
    )
    .expect("level starts")
}

fn send(game: &mut Game, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    apply(game, command, &mut events).expect("command applies");
    events
}

fn step(game: &mut Game, direction: Direction) -> Vec<Event> {
    send(game, Command::Move { direction })
}

fn wait(game: &mut Game, millis: u64) -> Vec<Event> {
    send(
        game,
        Command::Tick {
            dt: Duration::from_millis(millis),
        },
    )
}

fn clear_first_level(game: &mut Game) -> Vec<Event> {
    let mut events = step(game, Direction::Right);
    events.extend(step(game, Direction::Right));
    events
}

#[test]
fn first_level_is_won_in_two_moves() {
    let mut game = launch("1");
    let level = query::level(&game).expect("playing");
    assert_eq!(level.player().cell, CellCoord::new(2, 3));
    assert_eq!(level.player().carry, Some(Item::Key));

    let events = clear_first_level(&mut game);
    let cleared = Event::LevelCleared {
        id: LevelId::new("1"),
        score: 1,
    };
    let won = Event::StageChanged {
        stage: StageKind::Win,
    };
    assert_eq!(events.iter().filter(|event| **event == cleared).count(), 1);
    assert_eq!(events.iter().filter(|event| **event == won).count(), 1);

    assert_eq!(query::stage(&game), StageKind::Win);
    let win = query::win(&game).expect("win state");
    assert_eq!(win.cleared(), &LevelId::new("1"));
    assert_eq!(win.next(), Some(&LevelId::new("2")));
    assert_eq!(query::location(&game), None);
}

#[test]
fn continue_waits_for_the_cooldown() {
    let mut game = launch("1");
    let _ = clear_first_level(&mut game);

    assert_eq!(
        send(&mut game, Command::Continue),
        vec![Event::InputIgnored {
            reason: IgnoreReason::CooldownActive,
        }]
    );
    assert!(!wait(&mut game, 599).contains(&Event::ContinueAvailable));
    assert_eq!(
        send(&mut game, Command::Continue),
        vec![Event::InputIgnored {
            reason: IgnoreReason::CooldownActive,
        }]
    );
    assert!(wait(&mut game, 2).contains(&Event::ContinueAvailable));
    assert!(!wait(&mut game, 100).contains(&Event::ContinueAvailable));

    let events = send(&mut game, Command::Continue);
    assert!(events.contains(&Event::LevelStarted {
        id: LevelId::new("2"),
        generation: 2,
    }));
    assert!(events.contains(&Event::LocationChanged {
        location: Some("/2".to_owned()),
    }));
    assert_eq!(query::stage(&game), StageKind::Playing);
    assert_eq!(query::location(&game), Some("/2"));
}

#[test]
fn level_browser_appears_after_the_longer_delay() {
    let mut game = launch("1");
    let _ = clear_first_level(&mut game);

    let events = wait(&mut game, 1_999);
    assert!(events.contains(&Event::ContinueAvailable));
    assert!(!events.contains(&Event::LevelBrowserAvailable));
    assert_eq!(
        send(&mut game, Command::BrowseLevels),
        vec![Event::InputIgnored {
            reason: IgnoreReason::CooldownActive,
        }]
    );

    assert!(wait(&mut game, 1).contains(&Event::LevelBrowserAvailable));
    let events = send(&mut game, Command::BrowseLevels);
    assert!(events.contains(&Event::StageChanged {
        stage: StageKind::ChooseLevel,
    }));
    assert_eq!(query::stage(&game), StageKind::ChooseLevel);
}

#[test]
fn leaving_the_win_screen_cancels_pending_reveals() {
    let mut game = launch("1");
    let _ = clear_first_level(&mut game);
    let _ = send(&mut game, Command::OpenLevelChooser);

    let events = wait(&mut game, 5_000);
    assert!(!events.contains(&Event::ContinueAvailable));
    assert!(!events.contains(&Event::LevelBrowserAvailable));
    assert_eq!(query::stage(&game), StageKind::ChooseLevel);
}

#[test]
fn choosing_an_unknown_level_fails_without_side_effects() {
    let mut game = launch("4");
    let mut events = Vec::new();
    let error = apply(
        &mut game,
        Command::ChooseLevel {
            id: LevelId::new("99"),
        },
        &mut events,
    )
    .unwrap_err();

    assert!(matches!(
        error,
        ProgressionError::Catalog(CatalogError::UnknownLevel(ref id)) if id.as_str() == "99"
    ));
    assert!(events.is_empty());
    assert_eq!(query::stage(&game), StageKind::Playing);
    assert_eq!(query::generation(&game), 1);
}

#[test]
fn choosing_a_level_works_from_any_stage() {
    let mut game = launch("1");
    let _ = send(&mut game, Command::OpenLevelChooser);
    let events = send(
        &mut game,
        Command::ChooseLevel {
            id: LevelId::new("13"),
        },
    );
    assert!(events.contains(&Event::LevelStarted {
        id: LevelId::new("13"),
        generation: 2,
    }));
    assert_eq!(
        query::level(&game).expect("playing").id(),
        &LevelId::new("13")
    );
}

#[test]
fn restart_rebuilds_the_level_with_a_new_generation() {
    let mut game = launch("1");
    let _ = step(&mut game, Direction::Right);
    assert_eq!(
        query::level(&game).expect("playing").player().cell,
        CellCoord::new(3, 3)
    );

    let events = send(&mut game, Command::Restart);
    assert!(events.contains(&Event::LevelStarted {
        id: LevelId::new("1"),
        generation: 2,
    }));
    let level = query::level(&game).expect("playing");
    assert_eq!(level.player().cell, CellCoord::new(2, 3));
    assert_eq!(level.player().carry, Some(Item::Key));
    assert_eq!(level.generation(), 2);
    assert_eq!(level.remaining_targets(), 1);
}

#[test]
fn restart_outside_a_level_is_ignored() {
    let mut game = launch("1");
    let _ = send(&mut game, Command::OpenLevelChooser);
    assert_eq!(
        send(&mut game, Command::Restart),
        vec![Event::InputIgnored {
            reason: IgnoreReason::WrongStage,
        }]
    );
    assert_eq!(query::generation(&game), 1);
}

#[test]
fn numpad_level_is_solved_through_the_command_surface() {
    let mut game = launch("15");
    let code = query::level(&game)
        .expect("playing")
        .objects()
        .iter()
        .find_map(|object| match &object.kind {
            ObjectKind::NumpadLock { code } => Some(code.clone()),
            _ => None,
        })
        .expect("level 15 has a numpad lock");

    let _ = step(&mut game, Direction::Up);
    let events = step(&mut game, Direction::Up);
    assert!(events.iter().any(|event| matches!(event, Event::PopoverOpened { .. })));
    assert_eq!(
        step(&mut game, Direction::Left),
        vec![Event::InputIgnored {
            reason: IgnoreReason::PopoverPending,
        }]
    );

    let _ = wait(&mut game, 599);
    assert_eq!(
        send(&mut game, Command::SubmitCode { digits: code.clone() }),
        vec![Event::InputIgnored {
            reason: IgnoreReason::CooldownActive,
        }]
    );
    assert!(wait(&mut game, 2).contains(&Event::PopoverReady));

    let wrong: String = code
        .chars()
        .map(|digit| if digit == '0' { '1' } else { '0' })
        .collect();
    assert!(send(&mut game, Command::SubmitCode { digits: wrong }).contains(
        &Event::EffectDeclared {
            effect: Effect::CodeRejected,
        }
    ));

    let events = send(&mut game, Command::SubmitCode { digits: code });
    assert!(events.contains(&Event::CodeAccepted));
    assert!(events.contains(&Event::PopoverClosed));
    assert_eq!(
        query::level(&game).expect("playing").player().cell,
        CellCoord::new(3, 3)
    );

    for _ in 0..3 {
        let _ = step(&mut game, Direction::Up);
    }
    assert_eq!(query::stage(&game), StageKind::Win);
    assert_eq!(
        query::win(&game).and_then(|win| win.next()),
        Some(&LevelId::new("16"))
    );
}

#[test]
fn ad_hoc_templates_lead_to_the_chooser() {
    let mut game = Game::new(Catalog::builtin(), GameConfig::default());
    let template = LevelTemplate::new(
        "sandbox",
        "Sandbox",
        CellCoord::new(0, 0),
        OnLoad::Script(vec![Placement::cells(ObjectKind::Target, &[(1, 0)])]),
    );
    let mut events = Vec::new();
    game.start_level(LevelSource::Template(template), &mut events)
        .expect("template starts");
    assert!(events.contains(&Event::LocationChanged { location: None }));

    let _ = step(&mut game, Direction::Right);
    assert_eq!(query::win(&game).and_then(|win| win.next()), None);

    let _ = wait(&mut game, 600);
    let _ = send(&mut game, Command::Continue);
    assert_eq!(query::stage(&game), StageKind::ChooseLevel);
}

#[test]
fn same_seed_builds_the_same_random_levels() {
    let first = launch("12");
    let second = launch("12");
    assert_eq!(query::level(&first), query::level(&second));
}
