use core::str::FromStr;
use minefield_core::{Coord, Coord2};
use thiserror::Error;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Restart,
    Redraw,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub(crate) enum CommandError {
    #[error("Unknown command `{0}`")]
    Unknown(String),
    #[error("Expected two coordinates after `{0}`")]
    MissingCoords(String),
    #[error("Invalid coordinate `{0}`")]
    InvalidCoord(String),
    #[error("Unexpected trailing input `{0}`")]
    Trailing(String),
}

pub(crate) const HELP: &str = "\
Commands:
  r X Y   reveal the cell at column X, row Y
  f X Y   flag or unflag the cell at column X, row Y
  n       start a new game
  h       show this help
  q       quit
  (empty) redraw the board";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Self::Redraw);
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Self::Reveal(parse_coords(verb, &mut words)?),
            "f" | "flag" => Self::Flag(parse_coords(verb, &mut words)?),
            "n" | "new" | "restart" => Self::Restart,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return Err(CommandError::Unknown(verb.to_owned())),
        };

        match words.next() {
            Some(extra) => Err(CommandError::Trailing(extra.to_owned())),
            None => Ok(command),
        }
    }
}

fn parse_coords<'a>(verb: &str, words: &mut impl Iterator<Item = &'a str>) -> Result<Coord2, CommandError> {
    let (Some(x), Some(y)) = (words.next(), words.next()) else {
        return Err(CommandError::MissingCoords(verb.to_owned()));
    };
    Ok((parse_coord(x)?, parse_coord(y)?))
}

fn parse_coord(word: &str) -> Result<Coord, CommandError> {
    word.parse()
        .map_err(|_| CommandError::InvalidCoord(word.to_owned()))
}
