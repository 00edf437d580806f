#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// short circuits if the value was [`Some`].
macro_rules! happy_try {
    ($x:expr) => {
        if let Some(tmp) = $x {
            return Some(tmp);
        }
    };
}

pub mod game;
mod piece;
mod position;

use std::fmt::Display;

pub use game::{Board, Game, MoveError, MoveInfo, MoveOutcome};
pub use piece::Piece;
pub use position::{InvalidNotation, Position};

/// Of which kind a piece is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum PieceKind {
    /// a pawn (♙)
    #[default]
    Pawn,
    /// a rook (♖)
    Rook,
    /// a knight (♘)
    Knight,
    /// a bishop (♗)
    Bishop,
    /// a queen (♕)
    Queen,
    /// a king (♔)
    King,
}

impl PieceKind {
    /// the name of the kind, as shown to players
    pub const fn name(&self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Rook => "Rook",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PieceKind::Pawn => 'P',
                PieceKind::Rook => 'R',
                PieceKind::Knight => 'N',
                PieceKind::Bishop => 'B',
                PieceKind::Queen => 'Q',
                PieceKind::King => 'K',
            }
        )
    }
}

/// The side a piece belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Color {
    /// The light colored pieces (the ones that start)
    #[default]
    White,
    /// The dark colored pieces
    Black,
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Color::White => "white",
                Color::Black => "black",
            }
        )
    }
}

impl Color {
    /// changes the inner value to the other color
    #[inline]
    pub fn flip(&mut self) {
        let other = self.other();
        *self = other;
    }

    /// returns the opposing color
    #[inline]
    pub const fn other(&self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// the result of a game this color has won
    ///
    /// ```
    /// # use chess_rules::Color;
    /// assert_eq!(Color::White.win_result(), "1-0");
    /// assert_eq!(Color::Black.win_result(), "0-1");
    /// ```
    #[inline]
    pub const fn win_result(&self) -> &'static str {
        match self {
            Color::White => "1-0",
            Color::Black => "0-1",
        }
    }

    /// the row on which the pawns of this color promote
    ///
    /// ```
    /// # use chess_rules::Color;
    /// assert_eq!(Color::White.promotion_row(), 0);
    /// assert_eq!(Color::Black.promotion_row(), 7);
    /// ```
    #[inline]
    pub const fn promotion_row(&self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// the row on which the king and rooks of this color start out
    #[inline]
    pub const fn home_row(&self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// the row on which the pawns of this color start out
    #[inline]
    pub const fn pawn_row(&self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// the row offset of a pawn step. White moves towards row 0
    #[inline]
    pub const fn forward(&self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
}
