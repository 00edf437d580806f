use std::{
    fmt::Display,
    ops::{Index, IndexMut},
};

use tinyvec::ArrayVec;

use crate::{Color, Piece, PieceKind, Position};

use super::movegen::PieceMove;

/// The cells touched by one edit of the grid, together with what they held before. Replaying it
/// backwards restores the grid exactly.
pub(crate) type Backup = ArrayVec<[(Position, Option<Piece>); 4]>;

/// The 8×8 cells of a chess board. Indexable via [`Position`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    pub(super) fields: [Option<Piece>; 64],
}

impl Index<Position> for Grid {
    type Output = Option<Piece>;

    fn index(&self, i: Position) -> &Self::Output {
        &self.fields[Self::index(i.row(), i.col())]
    }
}

impl IndexMut<Position> for Grid {
    fn index_mut(&mut self, i: Position) -> &mut Self::Output {
        &mut self.fields[Self::index(i.row(), i.col())]
    }
}

impl Grid {
    fn index(row: u8, col: u8) -> usize {
        row as usize * 8 + col as usize
    }

    /// A grid without any pieces on it
    pub const fn empty() -> Self {
        Grid { fields: [None; 64] }
    }

    /// Sets up a new grid in the standard way.
    pub fn new() -> Self {
        use PieceKind::*;
        const BACK_RANK: [PieceKind; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut grid = Self::empty();
        for (col, kind) in (0..8).zip(BACK_RANK) {
            grid[Position::new(0, col)] = Some(Piece::new_black(kind));
            grid[Position::new(1, col)] = Some(Piece::new_black(Pawn));
            grid[Position::new(6, col)] = Some(Piece::new_white(Pawn));
            grid[Position::new(7, col)] = Some(Piece::new_white(kind));
        }
        grid
    }

    /// returns an iterator over each piece on the grid, including its position. Goes row by row,
    /// starting at A8.
    pub fn enumerate_pieces(&self) -> EnumeratePieces<'_> {
        EnumeratePieces {
            row: 0,
            col: 0,
            grid: self,
        }
    }

    /// returns an iterator over the pieces of one color, including their position
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.enumerate_pieces()
            .filter(move |(_, piece)| piece.color() == color)
    }

    /// Finds the king of the given color
    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.is_king())
            .map(|(pos, _)| pos)
    }

    /// Returns `true` if any piece of color `by` could move onto `target`. Castling candidates do
    /// not count: a king never attacks two columns away.
    pub fn is_attacked(&self, target: Position, by: Color) -> bool {
        self.pieces_of(by)
            .any(|(pos, piece)| PieceMove::attacks(pos, self, piece).any(|to| to == target))
    }

    /// Returns `true` if the king of `color` stands on an attacked square. Without a king there is
    /// nothing to attack.
    pub fn is_in_check(&self, color: Color) -> bool {
        self.king_position(color)
            .is_some_and(|king| self.is_attacked(king, color.other()))
    }

    /// moves whatever stands on `from` to `to`, leaving `from` empty. Records the previous contents
    /// of both cells into `backup`.
    pub(crate) fn relocate(&mut self, from: Position, to: Position, backup: &mut Backup) {
        let moving = self[from];
        self.place(to, moving, backup);
        self.place(from, None, backup);
    }

    /// puts `piece` on `pos`, recording the previous contents into `backup`.
    pub(crate) fn place(&mut self, pos: Position, piece: Option<Piece>, backup: &mut Backup) {
        backup.push((pos, self[pos]));
        self[pos] = piece;
    }

    /// reverts the edits recorded in `backup`, newest first
    pub(crate) fn restore(&mut self, backup: &Backup) {
        for &(pos, piece) in backup.iter().rev() {
            self[pos] = piece;
        }
    }

    /// Moves the piece on `from` to `to`, evaluates `f` on the resulting grid and puts everything
    /// back before returning.
    pub(crate) fn simulate<R>(
        &mut self,
        from: Position,
        to: Position,
        f: impl FnOnce(&Grid) -> R,
    ) -> R {
        if from == to {
            return f(self);
        }
        let mut backup = Backup::new();
        self.relocate(from, to, &mut backup);
        let result = f(self);
        self.restore(&backup);
        result
    }

    /// the grid as rows of cells, row 0 (rank 8) first
    pub fn rows(&self) -> [[Option<Piece>; 8]; 8] {
        let mut rows = [[None; 8]; 8];
        for (pos, piece) in self.enumerate_pieces() {
            rows[pos.row() as usize][pos.col() as usize] = Some(piece);
        }
        rows
    }
}

/// Iterator over the occupied cells of a [`Grid`], see [`Grid::enumerate_pieces`]
#[derive(Debug)]
pub struct EnumeratePieces<'a> {
    row: u8,
    col: u8,
    grid: &'a Grid,
}

impl<'a> EnumeratePieces<'a> {
    fn next_idx(&mut self) -> Option<Position> {
        let position = Position::try_new(self.row, self.col)?;
        self.col += 1;
        if self.col >= 8 {
            self.col = 0;
            self.row += 1;
        }
        Some(position)
    }
}

impl<'a> Iterator for EnumeratePieces<'a> {
    type Item = (Position, Piece);
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let pos = self.next_idx()?;
            happy_try!(self.grid[pos].map(|x| (pos, x)));
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats the grid as the piece placement field of a FEN string
impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..8 {
            let mut skip = 0;
            for col in 0..8 {
                match self.fields[Self::index(row, col)] {
                    Some(p) => {
                        if skip != 0 {
                            write!(f, "{skip}")?;
                        }
                        skip = 0;
                        write!(f, "{}", p.fen_char())?;
                    }
                    None => skip += 1,
                }
            }
            if skip != 0 {
                write!(f, "{skip}")?;
            }
            if row != 7 {
                write!(f, "/")?;
            }
        }

        Ok(())
    }
}
