//! Text commands: the `d` / `f X` / `p A B` / `q` surface shared by the line
//! loop and the TUI command prompt.

use crate::engine::SolitaireEngine;
use crate::game::{Move, MoveError};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Command {
    Draw,
    /// Pile index to move to its foundation.
    Foundation(usize),
    /// Source and destination pile indices.
    Pile(usize, usize),
    Quit,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: '{0}'")]
    Unknown(String),
    #[error("'{command}' takes {expected} argument(s), got {got}")]
    Arity { command: String, expected: usize, got: usize },
    #[error("invalid pile index: '{0}'")]
    Index(String),
}

/// What applying a command did.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Outcome {
    Applied(Move),
    Rejected(MoveError),
    Quit,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }
}

fn index(s: &str) -> Result<usize, CommandParseError> {
    s.parse().map_err(|_| CommandParseError::Index(s.to_string()))
}

/// ```
/// use klondike_rs::command::Command;
///
/// assert_eq!("p 3 5".parse(), Ok(Command::Pile(3, 5)));
/// assert!("f".parse::<Command>().is_err());
/// ```
impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        let (head, args) = words.split_first().ok_or(CommandParseError::Empty)?;
        let expected = match head.to_ascii_lowercase().as_str() {
            "d" | "q" => 0,
            "f" => 1,
            "p" => 2,
            _ => return Err(CommandParseError::Unknown(head.to_string())),
        };
        if args.len() != expected {
            return Err(CommandParseError::Arity {
                command: head.to_string(),
                expected,
                got: args.len(),
            });
        }
        let cmd = match (head.to_ascii_lowercase().as_str(), args) {
            ("d", []) => Command::Draw,
            ("q", []) => Command::Quit,
            ("f", [pile]) => Command::Foundation(index(pile)?),
            ("p", [from, to]) => Command::Pile(index(from)?, index(to)?),
            _ => return Err(CommandParseError::Unknown(s.trim().to_string())),
        };
        Ok(cmd)
    }
}

impl Command {
    pub fn apply<E: SolitaireEngine + ?Sized>(self, engine: &mut E) -> Outcome {
        let res = match self {
            Command::Quit => return Outcome::Quit,
            Command::Draw => Ok(engine.draw()),
            Command::Foundation(pile) => engine.move_to_foundation(pile),
            Command::Pile(from, to) => engine.move_to_pile(from, to),
        };
        match res {
            Ok(mv) => Outcome::Applied(mv),
            Err(err) => Outcome::Rejected(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;

    #[test]
    fn parses_original_syntax() {
        assert_eq!("d".parse(), Ok(Command::Draw));
        assert_eq!("  Q ".parse(), Ok(Command::Quit));
        assert_eq!("f 6".parse(), Ok(Command::Foundation(6)));
        assert_eq!("p 0   4".parse(), Ok(Command::Pile(0, 4)));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!("".parse::<Command>(), Err(CommandParseError::Empty));
        assert!(matches!("x".parse::<Command>(), Err(CommandParseError::Unknown(_))));
        assert!(matches!("p 1".parse::<Command>(), Err(CommandParseError::Arity { got: 1, .. })));
        assert!(matches!("d 1".parse::<Command>(), Err(CommandParseError::Arity { .. })));
        assert!(matches!("f -1".parse::<Command>(), Err(CommandParseError::Index(_))));
        assert!(matches!("p a b".parse::<Command>(), Err(CommandParseError::Index(_))));
    }

    #[test]
    fn apply_reports_rejection_without_change() {
        let mut g = Game::with_seed(5);
        let before = g.clone();
        let out = Command::Pile(2, 2).apply(&mut g);
        assert_eq!(out, Outcome::Rejected(MoveError::SamePile));
        assert_eq!(g, before);
        assert_eq!(Command::Quit.apply(&mut g), Outcome::Quit);
        assert!(Command::Draw.apply(&mut g).is_applied());
        assert_eq!(g.stock_len(), 23);
    }
}
