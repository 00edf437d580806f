use std::{fmt::Display, ops::Add, str::FromStr};

/// A square on the chess board, as `(row, column)`. Row 0 is rank 8 and column 0 is file A.
/// Enforces that the position is actually on the board.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Creates a new position. Ensures that the position is valid.
    ///
    /// ## Panics
    ///
    /// Panics if `row >= 8` or if `col >= 8`. To fail recoverably, use [`try_new`] instead
    ///
    /// [`try_new`]: Position::try_new
    pub fn new(row: u8, col: u8) -> Position {
        assert!(row < 8);
        assert!(col < 8);
        Position { row, col }
    }

    /// Creates a new position. Returns `None` if the position would not be valid
    pub const fn try_new(row: u8, col: u8) -> Option<Position> {
        if row < 8 && col < 8 {
            Some(Position { row, col })
        } else {
            None
        }
    }

    /// returns the row of the position. Row 0 is the eighth rank
    pub fn row(&self) -> u8 {
        self.row
    }

    /// returns the column of the position. Column 0 is the A file
    pub fn col(&self) -> u8 {
        self.col
    }

    /// Parses a square in file-rank notation such as `E2`. The file letter may be lower or upper
    /// case.
    ///
    /// ```
    /// # use chess_rules::*;
    /// assert_eq!(Position::from_notation("E2"), Ok(Position::new(6, 4)));
    /// assert_eq!(Position::from_notation("a8"), Ok(Position::new(0, 0)));
    /// assert!(Position::from_notation("I1").is_err());
    /// ```
    pub fn from_notation(s: &str) -> Result<Position, InvalidNotation> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(InvalidNotation::Length(s.chars().count()));
        };
        let col = match file.to_ascii_uppercase() {
            x @ 'A'..='H' => x as u8 - b'A',
            _ => return Err(InvalidNotation::File(file)),
        };
        let row = match rank {
            '1'..='8' => b'8' - rank as u8,
            _ => return Err(InvalidNotation::Rank(rank)),
        };
        Ok(Position { row, col })
    }

    /// Inverse of [`Position::from_notation`], always with an uppercase file letter.
    ///
    /// ```
    /// # use chess_rules::*;
    /// assert_eq!(Position::new(6, 4).to_notation(), "E2");
    /// ```
    pub fn to_notation(&self) -> String {
        self.to_string()
    }
}

impl Add<(i8, i8)> for Position {
    type Output = Option<Position>;

    fn add(self, (drow, dcol): (i8, i8)) -> Self::Output {
        let row = self.row.checked_add_signed(drow)?;
        let col = self.col.checked_add_signed(dcol)?;
        Position::try_new(row, col)
    }
}

/// Error that arises from [`Position::from_notation`]
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum InvalidNotation {
    /// the input was not exactly two characters long
    #[error("expected two characters, got {0}")]
    Length(usize),
    /// the first character is not a file letter `A`-`H`
    #[error("'{0}' is not a file between A and H")]
    File(char),
    /// the second character is not a rank digit `1`-`8`
    #[error("'{0}' is not a rank between 1 and 8")]
    Rank(char),
}

impl FromStr for Position {
    type Err = InvalidNotation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_notation(s)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = if self.col < 8 { self.col + b'A' } else { b'?' } as char;
        let rank = if self.row < 8 { b'8' - self.row } else { b'?' } as char;

        write!(f, "{file}{rank}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_any_position() {
        let files = b"ABCDEFGH ,.14nr8";
        let ranks = b"87654321 90abcz'";

        for (i, &file) in files.iter().enumerate() {
            for (j, &rank) in ranks.iter().enumerate() {
                let arr = [file, rank];
                let s = std::str::from_utf8(&arr).unwrap();
                let pos = s.parse::<Position>();
                if i < 8 && j < 8 {
                    assert_eq!(pos, Ok(Position::new(j as u8, i as u8)));
                    assert_eq!(pos.unwrap().to_notation(), s);
                } else if i >= 8 {
                    assert_eq!(pos, Err(InvalidNotation::File(file as char)));
                } else {
                    assert_eq!(pos, Err(InvalidNotation::Rank(rank as char)));
                }
            }
        }
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!("E41".parse::<Position>(), Err(InvalidNotation::Length(3)));
        assert_eq!("E8 ".parse::<Position>(), Err(InvalidNotation::Length(3)));
        assert_eq!("E".parse::<Position>(), Err(InvalidNotation::Length(1)));
        assert_eq!("".parse::<Position>(), Err(InvalidNotation::Length(0)));
    }

    #[test]
    fn lowercase_files_are_accepted() {
        assert_eq!("h1".parse::<Position>(), Ok(Position::new(7, 7)));
        assert_eq!("h1".parse::<Position>().unwrap().to_string(), "H1");
    }

    #[test]
    fn offsets_stay_on_board() {
        let a8 = Position::new(0, 0);
        assert_eq!(a8 + (-1, 0), None);
        assert_eq!(a8 + (0, -1), None);
        assert_eq!(a8 + (1, 2), Some(Position::new(1, 2)));
        assert_eq!(Position::new(7, 7) + (1, 0), None);
        assert_eq!(Position::new(7, 7) + (0, 1), None);
    }
}
