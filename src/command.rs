use std::str::FromStr;

use chess_rules::{InvalidNotation, Position};

/// One line of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// move the piece on the first square to the second
    Move(Position, Position),
    /// take back the last move
    Undo,
    /// list where the piece on the square may go
    Moves(Position),
    /// start over
    New,
    /// give up, ending the game
    Resign,
    /// leave the program
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty input")]
    Empty,
    #[error("unknown command \"{0}\"")]
    Unknown(String),
    #[error(transparent)]
    Square(#[from] InvalidNotation),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        let command = match words.as_slice() {
            [] => return Err(ParseCommandError::Empty),
            [word] => match word.to_ascii_lowercase().as_str() {
                "undo" => Command::Undo,
                "new" => Command::New,
                "resign" => Command::Resign,
                "quit" | "exit" => Command::Quit,
                // `e2e4`
                _ if word.len() == 4 && word.is_ascii() => {
                    Command::Move(word[..2].parse()?, word[2..].parse()?)
                }
                _ => return Err(ParseCommandError::Unknown(word.to_string())),
            },
            [word, square] if word.eq_ignore_ascii_case("moves") => Command::Moves(square.parse()?),
            [from, to] => Command::Move(from.parse()?, to.parse()?),
            _ => return Err(ParseCommandError::Unknown(s.trim().to_string())),
        };
        Ok(command)
    }
}
