use std::time::Duration;

use anyhow::{bail, Context, Result};
use walkie_core::{Command, Direction};

/// A parsed line of player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    /// Forwards a command to the game.
    Command(Command),
    /// Starts the level with the provided name or path.
    Choose(String),
    /// Advances the clock without other input.
    Wait(Duration),
    /// Redraws the current stage.
    Show,
    /// Prints the command reference.
    Help,
    /// Leaves the game.
    Quit,
}

/// Command reference printed by `help`.
pub(crate) const HELP: &str = "\
moves:    w a s d, or up down left right
drop      put the carried item down
code N    enter digits into an open numpad
ok        close a character's request
next      continue after winning a level
browse    open the level list from the win screen
levels    open the level list at any time
play N    start level N (also /N)
restart   start the current level again
wait MS   let MS milliseconds pass
look      draw the board again
quit      leave";

/// Parses one line of input.
pub(crate) fn parse(line: &str) -> Result<Input> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Input::Show);
    };
    let argument = words.next();
    if let Some(extra) = words.next() {
        bail!("unexpected `{extra}` after `{head}`");
    }

    let head = head.to_ascii_lowercase();
    if let Some(direction) = direction(&head) {
        return Ok(Input::Command(Command::Move { direction }));
    }
    if let Some(path) = head.strip_prefix('/') {
        return Ok(Input::Choose(path.to_owned()));
    }

    let input = match (head.as_str(), argument) {
        ("drop" | "x", None) => Input::Command(Command::Drop),
        ("code", Some(digits)) => {
            if !digits.chars().all(|c| c.is_ascii_digit()) {
                bail!("a code is made of digits, got `{digits}`");
            }
            Input::Command(Command::SubmitCode {
                digits: digits.to_owned(),
            })
        }
        ("ok" | "dismiss", None) => Input::Command(Command::DismissPopover),
        ("next" | "continue", None) => Input::Command(Command::Continue),
        ("browse", None) => Input::Command(Command::BrowseLevels),
        ("levels" | "menu", None) => Input::Command(Command::OpenLevelChooser),
        ("play" | "choose", Some(level)) => Input::Choose(level.to_owned()),
        ("restart" | "r", None) => Input::Command(Command::Restart),
        ("wait", Some(millis)) => {
            let millis: u64 = millis
                .parse()
                .with_context(|| format!("`{millis}` is not a number of milliseconds"))?;
            Input::Wait(Duration::from_millis(millis))
        }
        ("look" | "l", None) => Input::Show,
        ("help" | "?", None) => Input::Help,
        ("quit" | "q" | "exit", None) => Input::Quit,
        (_, Some(argument)) => bail!("`{head}` does not take `{argument}`; try `help`"),
        (_, None) => bail!("unknown command `{head}`; try `help`"),
    };
    Ok(input)
}

fn direction(word: &str) -> Option<Direction> {
    match word {
        "w" | "k" => Some(Direction::Up),
        "s" | "j" => Some(Direction::Down),
        "a" | "h" => Some(Direction::Left),
        "d" => Some(Direction::Right),
        _ => Direction::parse(word),
    }
}
