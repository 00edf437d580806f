use std::fmt::Display;

use crate::{Color, PieceKind};

/// A piece with a color. Construct this with [`Piece::new_black`] and [`Piece::new_white`]. There
/// usually is no need to construct though, as this is done by [`Board::new`]
///
/// A piece does not know where it stands: its square is the cell of the [`Board`] that holds it,
/// so the two can never disagree.
///
/// [`Board`]: crate::Board
/// [`Board::new`]: crate::Board::new
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
}

impl Piece {
    /// Constructs a new Piece with the given kind for the given color
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// Constructs a new dark colored piece
    pub const fn new_black(kind: PieceKind) -> Self {
        Self::new(kind, Color::Black)
    }

    /// Constructs a new light colored piece
    pub const fn new_white(kind: PieceKind) -> Self {
        Self::new(kind, Color::White)
    }

    /// returns to which side the piece belongs
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// returns the [`PieceKind`] of the piece, i.e. 'erases' the color
    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns `true` if the piece kind is [`Pawn`].
    ///
    /// [`Pawn`]: PieceKind::Pawn
    ///
    /// ```
    /// # use chess_rules::*;
    /// assert_eq!(Piece::new_black(PieceKind::Pawn).is_pawn(), true);
    /// ```
    #[must_use]
    #[inline]
    pub fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    /// Returns `true` if the piece kind is [`Rook`].
    ///
    /// [`Rook`]: PieceKind::Rook
    #[must_use]
    #[inline]
    pub fn is_rook(&self) -> bool {
        matches!(self.kind, PieceKind::Rook)
    }

    /// Returns `true` if the piece kind is [`King`].
    ///
    /// [`King`]: PieceKind::King
    ///
    /// ```
    /// # use chess_rules::*;
    /// assert_eq!(Piece::new_white(PieceKind::King).is_king(), true);
    /// assert_eq!(Piece::new_white(PieceKind::Queen).is_king(), false);
    /// ```
    #[must_use]
    #[inline]
    pub fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// The two character symbol a text rendering shows for this piece: the color initial followed
    /// by the kind letter.
    ///
    /// ```
    /// # use chess_rules::*;
    /// assert_eq!(Piece::new_white(PieceKind::King).symbol(), "wK");
    /// assert_eq!(Piece::new_black(PieceKind::Knight).symbol(), "bN");
    /// ```
    pub const fn symbol(&self) -> &'static str {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Pawn) => "wP",
            (Color::White, PieceKind::Rook) => "wR",
            (Color::White, PieceKind::Knight) => "wN",
            (Color::White, PieceKind::Bishop) => "wB",
            (Color::White, PieceKind::Queen) => "wQ",
            (Color::White, PieceKind::King) => "wK",
            (Color::Black, PieceKind::Pawn) => "bP",
            (Color::Black, PieceKind::Rook) => "bR",
            (Color::Black, PieceKind::Knight) => "bN",
            (Color::Black, PieceKind::Bishop) => "bB",
            (Color::Black, PieceKind::Queen) => "bQ",
            (Color::Black, PieceKind::King) => "bK",
        }
    }

    /// The unicode chess glyph for this piece
    pub const fn glyph(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::King) => '♔',
            (Color::Black, PieceKind::Pawn) => '♟',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::King) => '♚',
        }
    }

    /// The FEN letter of the piece: uppercase for white, lowercase for black
    pub fn fen_char(&self) -> char {
        let letter = self.kind.to_string().chars().next().unwrap_or('?');
        match self.color {
            Color::White => letter,
            Color::Black => letter.to_ascii_lowercase(),
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.kind.name())
    }
}
