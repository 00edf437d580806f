use std::fmt::Display;

use itertools::Itertools;
use tinyvec::ArrayVec;

use crate::{Color, Piece, PieceKind, Position};

use super::{
    fen::{self, FenError},
    grid::{Backup, Grid},
    movegen::{KingMove, PieceMove},
};

/// Which rooks and kings have moved already. Once set, a flag stays set until the board is
/// replaced.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct CastlingRights {
    king_moved: bool,
    king_side_rook_moved: bool,
    queen_side_rook_moved: bool,
}

impl CastlingRights {
    /// neither the king nor any of the rooks have moved
    pub const fn all() -> Self {
        Self {
            king_moved: false,
            king_side_rook_moved: false,
            queen_side_rook_moved: false,
        }
    }

    /// both rooks have moved, so castling is impossible for the rest of the game
    pub const fn none() -> Self {
        Self {
            king_moved: false,
            king_side_rook_moved: true,
            queen_side_rook_moved: true,
        }
    }

    pub(super) const fn with_rooks(king_side: bool, queen_side: bool) -> Self {
        Self {
            king_moved: false,
            king_side_rook_moved: !king_side,
            queen_side_rook_moved: !queen_side,
        }
    }

    /// Returns `true` if the king has left its home square at some point
    pub fn king_moved(&self) -> bool {
        self.king_moved
    }

    /// Returns `true` if the rook of the given side has left (or been taken on) its corner
    pub fn rook_moved(&self, side: CastleSide) -> bool {
        match side {
            CastleSide::King => self.king_side_rook_moved,
            CastleSide::Queen => self.queen_side_rook_moved,
        }
    }

    /// Returns `true` if neither the king nor the rook of the given side have moved
    pub fn can_castle(&self, side: CastleSide) -> bool {
        !self.king_moved && !self.rook_moved(side)
    }

    fn mark_rook(&mut self, side: CastleSide) {
        match side {
            CastleSide::King => self.king_side_rook_moved = true,
            CastleSide::Queen => self.queen_side_rook_moved = true,
        }
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::all()
    }
}

/// The wing a king castles towards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// towards the H file, `O-O`
    King,
    /// towards the A file, `O-O-O`
    Queen,
}

impl CastleSide {
    /// the side whose castling destination is in column `col`, if any
    pub fn from_king_target(col: u8) -> Option<Self> {
        match col {
            6 => Some(Self::King),
            2 => Some(Self::Queen),
            _ => None,
        }
    }

    /// the column of the rook's corner
    pub const fn rook_col(self) -> u8 {
        match self {
            Self::King => 7,
            Self::Queen => 0,
        }
    }

    /// the column the rook ends up in after castling
    pub const fn rook_target_col(self) -> u8 {
        match self {
            Self::King => 5,
            Self::Queen => 3,
        }
    }

    /// the columns strictly between king and rook
    fn between(self) -> std::ops::Range<u8> {
        match self {
            Self::King => 5..7,
            Self::Queen => 1..4,
        }
    }

    fn from_rook_col(col: u8) -> Option<Self> {
        match col {
            7 => Some(Self::King),
            0 => Some(Self::Queen),
            _ => None,
        }
    }
}

/// Why a castling move was refused
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum CastlingError {
    /// the king has moved before
    #[error("the king has already moved")]
    KingMoved,
    /// the rook on that side has moved before
    #[error("the rook has already moved")]
    RookMoved,
    /// there is no rook of the king's color in the corner
    #[error("there is no rook to castle with")]
    RookMissing,
    /// a piece stands between king and rook
    #[error("{0} is not empty")]
    PathBlocked(Position),
    /// the king would stand on or cross an attacked square
    #[error("{0} is attacked")]
    SquareAttacked(Position),
    /// the king moved two columns, but not onto the C or G file
    #[error("{0} is not a castling square")]
    NotACastlingSquare(Position),
}

/// Why a move was refused. The board is left untouched in every case.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum MoveError {
    /// the origin is an empty square
    #[error("there is no piece on {0}")]
    NoPiece(Position),
    /// the piece on the origin belongs to the other side
    #[error("it is {expected}'s turn")]
    NotYourTurn {
        /// the side whose turn it is
        expected: Color,
    },
    /// the game has ended
    #[error("the game is over")]
    GameOver,
    /// the destination is not among the piece's moves
    #[error("the piece on {from} cannot move to {to}")]
    Unreachable {
        /// the origin of the move
        from: Position,
        /// the rejected destination
        to: Position,
    },
    /// the move exposes the mover's own king
    #[error("the move would leave the king in check")]
    LeavesKingInCheck,
    /// castling was attempted but not allowed
    #[error("cannot castle: {0}")]
    Castling(#[from] CastlingError),
}

/// What a single applied move did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveInfo {
    /// where the piece came from
    pub from: Position,
    /// where the piece went to. For castling, this is the king's destination.
    pub to: Position,
    /// the piece that moved, as it was before the move
    pub piece: Piece,
    /// the piece that was taken, if any
    pub captured: Option<Piece>,
    /// the kind a pawn was promoted to
    pub promotion: Option<PieceKind>,
    /// the wing, if this was a castling move
    pub castled: Option<CastleSide>,
}

impl MoveInfo {
    /// Returns `true` if the move took a king
    pub fn captured_king(&self) -> bool {
        self.captured.is_some_and(|piece| piece.is_king())
    }
}

/// Formats the move as `E2-E4`, `E4xD5`, `O-O`, `O-O-O` or `E7-E8=Q`
impl Display for MoveInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.castled {
            Some(CastleSide::King) => return write!(f, "O-O"),
            Some(CastleSide::Queen) => return write!(f, "O-O-O"),
            None => (),
        }
        let sep = if self.captured.is_some() { 'x' } else { '-' };
        write!(f, "{}{sep}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "={kind}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MoveRecord {
    info: MoveInfo,
    backup: Backup,
    castling_before: (CastlingRights, CastlingRights),
    captured_before: usize,
}

/// The authoritative state of a chess game: the grid, the captured pieces, who may still castle
/// and the moves that led here.
///
/// The board does not know whose turn it is; that is up to the [`Game`](super::Game).
///
/// ```
/// # use chess_rules::{Board, Position};
/// let mut board = Board::new();
/// let from: Position = "E2".parse().unwrap();
/// let to: Position = "E4".parse().unwrap();
///
/// let info = board.move_piece(from, to).unwrap();
/// assert_eq!(info.to_string(), "E2-E4");
/// assert_eq!(board.undo_move(), Some(info));
/// assert_eq!(board, Board::new());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    captured: Vec<Piece>,
    castling_white: CastlingRights,
    castling_black: CastlingRights,
    history: Vec<MoveRecord>,
}

impl Board {
    /// Sets up a new board in the standard way.
    pub fn new() -> Self {
        Self::with_grid(Grid::new(), CastlingRights::all(), CastlingRights::all())
    }

    pub(super) fn with_grid(grid: Grid, white: CastlingRights, black: CastlingRights) -> Self {
        Self {
            grid,
            captured: Vec::new(),
            castling_white: white,
            castling_black: black,
            history: Vec::new(),
        }
    }

    /// Sets up a board from a FEN string. The side to move is ignored, see [`Game::from_fen`].
    ///
    /// [`Game::from_fen`]: super::Game::from_fen
    pub fn from_fen(s: &str) -> Result<Self, FenError> {
        Ok(fen::parse(s)?.board)
    }

    /// the cells of the board
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// the piece on `pos`, if any
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.grid[pos]
    }

    /// A read-only copy of the cells, indexed `[row][col]` with row 0 being rank 8
    pub fn snapshot(&self) -> [[Option<Piece>; 8]; 8] {
        self.grid.rows()
    }

    /// the pieces taken so far, in the order they were taken
    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    /// the moves that were applied to this board, oldest first
    pub fn history(
        &self,
    ) -> impl DoubleEndedIterator<Item = &MoveInfo> + ExactSizeIterator + '_ {
        self.history.iter().map(|record| &record.info)
    }

    /// Get the castling flags for the given color
    ///
    /// ## Examples
    /// ```
    /// # use chess_rules::{Board, Color, game::CastleSide};
    /// let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
    /// let white = board.castling_rights(Color::White);
    /// assert!(white.can_castle(CastleSide::King));
    /// assert!(!white.can_castle(CastleSide::Queen));
    /// ```
    pub fn castling_rights(&self, color: Color) -> &CastlingRights {
        match color {
            Color::Black => &self.castling_black,
            Color::White => &self.castling_white,
        }
    }

    fn castling_rights_mut(&mut self, color: Color) -> &mut CastlingRights {
        match color {
            Color::Black => &mut self.castling_black,
            Color::White => &mut self.castling_white,
        }
    }

    /// The pseudo-legal moves of the piece on `piece_pos`, castling candidates included. Returns
    /// `None` for an empty square.
    pub fn possible_moves(&self, piece_pos: Position) -> Option<PieceMove<'_>> {
        let piece = self.grid[piece_pos]?;
        Some(PieceMove::new_with_piece(piece_pos, &self.grid, piece))
    }

    /// The destinations [`Board::move_piece`] would accept for the piece on `from`.
    pub fn legal_moves(&self, from: Position) -> ArrayVec<[Position; 32]> {
        let mut legal = ArrayVec::new();
        let Some(piece) = self.grid[from] else {
            return legal;
        };
        let color = piece.color();
        let mut scratch = self.grid.clone();

        for to in PieceMove::new_with_piece(from, &self.grid, piece) {
            let ok = if Self::is_castling_attempt(piece, from, to) {
                self.check_castling(from, to).is_ok()
            } else {
                scratch.simulate(from, to, |grid| !grid.is_in_check(color))
            };
            if ok {
                legal.push(to);
            }
        }
        legal
    }

    /// Returns `true` if any piece of `color` has a move [`Board::move_piece`] would accept
    pub fn has_legal_move(&self, color: Color) -> bool {
        self.grid
            .pieces_of(color)
            .any(|(pos, _)| !self.legal_moves(pos).is_empty())
    }

    fn is_castling_attempt(piece: Piece, from: Position, to: Position) -> bool {
        piece.is_king() && from.row() == to.row() && from.col().abs_diff(to.col()) == 2
    }

    /// Applies a move, checking it against the rules first.
    ///
    /// A king moving two columns along its row is treated as castling. Pawns reaching the far
    /// rank become queens. Taking a king is allowed and ends the game, see [`Board::winner`].
    pub fn move_piece(&mut self, from: Position, to: Position) -> Result<MoveInfo, MoveError> {
        let piece = self.grid[from].ok_or(MoveError::NoPiece(from))?;
        if Self::is_castling_attempt(piece, from, to) {
            return Ok(self.castle(from, to)?);
        }

        if !PieceMove::new_with_piece(from, &self.grid, piece).contains(&to) {
            return Err(MoveError::Unreachable { from, to });
        }

        let color = piece.color();
        let captured = self.grid[to];
        let mut backup = Backup::new();
        self.grid.relocate(from, to, &mut backup);
        if self.grid.is_in_check(color) {
            self.grid.restore(&backup);
            return Err(MoveError::LeavesKingInCheck);
        }

        let castling_before = (self.castling_white, self.castling_black);
        let captured_before = self.captured.len();
        if let Some(captured) = captured {
            self.captured.push(captured);
        }
        self.update_castling_rights(piece, from, to);

        let mut promotion = None;
        if piece.is_pawn() && to.row() == color.promotion_row() {
            self.grid
                .place(to, Some(Piece::new(PieceKind::Queen, color)), &mut backup);
            promotion = Some(PieceKind::Queen);
        }

        let info = MoveInfo {
            from,
            to,
            piece,
            captured,
            promotion,
            castled: None,
        };
        self.history.push(MoveRecord {
            info,
            backup,
            castling_before,
            captured_before,
        });
        Ok(info)
    }

    fn update_castling_rights(&mut self, piece: Piece, from: Position, to: Position) {
        if piece.is_king() {
            self.castling_rights_mut(piece.color()).king_moved = true;
        }
        // a rook leaving its corner, or anything landing on it
        for color in [Color::White, Color::Black] {
            for pos in [from, to] {
                if pos.row() != color.home_row() {
                    continue;
                }
                if let Some(side) = CastleSide::from_rook_col(pos.col()) {
                    self.castling_rights_mut(color).mark_rook(side);
                }
            }
        }
    }

    /// Validates castling from `from` to `to` without changing anything
    fn check_castling(&self, from: Position, to: Position) -> Result<CastleSide, CastlingError> {
        let side =
            CastleSide::from_king_target(to.col()).ok_or(CastlingError::NotACastlingSquare(to))?;
        let king = self.grid[from].ok_or(CastlingError::KingMoved)?;
        let color = king.color();
        let rights = self.castling_rights(color);

        if from != KingMove::home(color) || rights.king_moved() {
            return Err(CastlingError::KingMoved);
        }
        if rights.rook_moved(side) {
            return Err(CastlingError::RookMoved);
        }
        let corner = Position::new(from.row(), side.rook_col());
        if self.grid[corner] != Some(Piece::new(PieceKind::Rook, color)) {
            return Err(CastlingError::RookMissing);
        }
        if let Some(blocked) = side
            .between()
            .map(|col| Position::new(from.row(), col))
            .find(|&pos| self.grid[pos].is_some())
        {
            return Err(CastlingError::PathBlocked(blocked));
        }

        // the king's square, the one it crosses and the one it lands on
        let mut scratch = self.grid.clone();
        let path = [from, Position::new(from.row(), (from.col() + to.col()) / 2), to];
        for square in path {
            let attacked = scratch.simulate(from, square, |grid| {
                grid.is_attacked(square, color.other())
            });
            if attacked {
                return Err(CastlingError::SquareAttacked(square));
            }
        }

        Ok(side)
    }

    fn castle(&mut self, from: Position, to: Position) -> Result<MoveInfo, CastlingError> {
        let side = self.check_castling(from, to)?;
        let king = self.grid[from].ok_or(CastlingError::KingMoved)?;
        let row = from.row();

        let castling_before = (self.castling_white, self.castling_black);
        let mut backup = Backup::new();
        self.grid.relocate(from, to, &mut backup);
        self.grid.relocate(
            Position::new(row, side.rook_col()),
            Position::new(row, side.rook_target_col()),
            &mut backup,
        );
        let rights = self.castling_rights_mut(king.color());
        rights.king_moved = true;
        rights.mark_rook(side);

        let info = MoveInfo {
            from,
            to,
            piece: king,
            captured: None,
            promotion: None,
            castled: Some(side),
        };
        self.history.push(MoveRecord {
            info,
            backup,
            castling_before,
            captured_before: self.captured.len(),
        });
        Ok(info)
    }

    /// Takes back the most recent move, including both pieces of a castling move and the queen
    /// of a promotion. Returns `None` if no move has been made.
    pub fn undo_move(&mut self) -> Option<MoveInfo> {
        let record = self.history.pop()?;
        self.grid.restore(&record.backup);
        (self.castling_white, self.castling_black) = record.castling_before;
        self.captured.truncate(record.captured_before);
        Some(record.info)
    }

    /// Returns `true` if any enemy piece could move onto the king of `color`
    pub fn is_check(&self, color: Color) -> bool {
        self.grid.is_in_check(color)
    }

    /// Returns `true` if `color` is in check and no move of theirs gets the king out of it.
    /// Castling is never an escape.
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_check(color) && !self.can_escape_check(color)
    }

    fn can_escape_check(&self, color: Color) -> bool {
        let mut scratch = self.grid.clone();
        self.grid.pieces_of(color).any(|(from, piece)| {
            PieceMove::attacks(from, &self.grid, piece)
                .any(|to| scratch.simulate(from, to, |grid| !grid.is_in_check(color)))
        })
    }

    /// Returns `true` if `color` is not in check but none of their pieces has anywhere to go.
    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_check(color)
            && self
                .grid
                .pieces_of(color)
                .all(|(pos, piece)| PieceMove::new_with_piece(pos, &self.grid, piece).next().is_none())
    }

    /// Returns `true` if a king has been taken
    pub fn is_king_captured(&self) -> bool {
        self.captured.iter().any(Piece::is_king)
    }

    /// The side that took the opposing king, if that happened
    pub fn winner(&self) -> Option<Color> {
        self.captured
            .iter()
            .find(|piece| piece.is_king())
            .map(|king| king.color().other())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Draws the board as text, rank 8 at the top. Dark empty squares are shown as `##`.
impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const FILES: &str = "   A  B  C  D  E  F  G  H";
        writeln!(f, "{FILES}")?;
        for (row, cells) in self.grid.rows().iter().enumerate() {
            let rank = 8 - row;
            let cells = cells
                .iter()
                .enumerate()
                .map(|(col, cell)| match cell {
                    Some(piece) => piece.symbol(),
                    None if (row + col) % 2 == 1 => "##",
                    None => "  ",
                })
                .join(" ");
            writeln!(f, "{rank}  {cells}  {rank}")?;
        }
        write!(f, "{FILES}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::tests::pieces::*;
    use pretty_assertions::assert_eq;

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    fn from_fen(fen: &str) -> Board {
        Board::from_fen(fen).expect("a valid FEN string")
    }

    #[test]
    fn opening_pawn_push() {
        let mut board = Board::new();
        let info = board.move_piece(pos("E2"), pos("E4")).unwrap();
        assert_eq!(board.piece_at(pos("E4")), P);
        assert_eq!(board.piece_at(pos("E2")), None);
        assert_eq!(info.captured, None);
        assert_eq!(board.history().len(), 1);
    }

    #[test]
    fn empty_origin_is_rejected() {
        let mut board = Board::new();
        assert_eq!(
            board.move_piece(pos("E4"), pos("E5")),
            Err(MoveError::NoPiece(pos("E4")))
        );
    }

    #[test]
    fn unreachable_destination_is_rejected() {
        let mut board = Board::new();
        let before = board.clone();
        assert_eq!(
            board.move_piece(pos("E2"), pos("E5")),
            Err(MoveError::Unreachable {
                from: pos("E2"),
                to: pos("E5")
            })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn pinned_piece_cannot_move() {
        // the knight on E2 shields the white king from the rook on E8
        let mut board = from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        let before = board.clone();
        assert_eq!(
            board.move_piece(pos("E2"), pos("C3")),
            Err(MoveError::LeavesKingInCheck)
        );
        assert_eq!(board, before);
    }

    #[test]
    fn king_cannot_step_into_check() {
        let mut board = from_fen("3r2k1/8/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(
            board.move_piece(pos("E1"), pos("D1")),
            Err(MoveError::LeavesKingInCheck)
        );
        assert!(board.move_piece(pos("E1"), pos("F2")).is_ok());
    }

    #[test]
    fn capture_is_recorded_and_undone() {
        let mut board = from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1");
        let before = board.clone();
        let info = board.move_piece(pos("E4"), pos("D5")).unwrap();
        assert_eq!(info.captured, p);
        assert_eq!(info.to_string(), "E4xD5");
        assert_eq!(board.captured(), &[p.unwrap()]);

        board.undo_move();
        assert_eq!(board, before);
    }

    #[test]
    fn check_along_open_file() {
        let board = from_fen("4r1k1/8/8/8/8/8/8/4K3 w - - 0 1");
        assert!(board.is_check(Color::White));
        assert!(!board.is_check(Color::Black));
    }

    #[test]
    fn promotes_to_queen() {
        let mut board = from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let info = board.move_piece(pos("A7"), pos("A8")).unwrap();
        assert_eq!(board.piece_at(pos("A8")), Q);
        assert_eq!(info.promotion, Some(PieceKind::Queen));
        assert_eq!(info.to_string(), "A7-A8=Q");
    }

    #[test]
    fn promotion_by_capture_is_undone() {
        let mut board = from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let before = board.clone();
        let info = board.move_piece(pos("A7"), pos("B8")).unwrap();
        assert_eq!(info.to_string(), "A7xB8=Q");
        assert_eq!(board.piece_at(pos("B8")), Q);

        assert_eq!(board.undo_move(), Some(info));
        assert_eq!(board, before);
        assert_eq!(board.piece_at(pos("A7")), P);
        assert_eq!(board.piece_at(pos("B8")), r);
    }

    #[test]
    fn black_pawn_promotes_on_first_rank() {
        let mut board = from_fen("4k3/8/8/8/8/8/6p1/K7 b - - 0 1");
        board.move_piece(pos("G2"), pos("G1")).unwrap();
        assert_eq!(board.piece_at(pos("G1")), q);
    }

    #[test]
    fn castles_king_side() {
        let mut board = from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        let info = board.move_piece(pos("E1"), pos("G1")).unwrap();
        assert_eq!(info.castled, Some(CastleSide::King));
        assert_eq!(info.to_string(), "O-O");
        assert_eq!(board.piece_at(pos("G1")), K);
        assert_eq!(board.piece_at(pos("F1")), R);
        assert_eq!(board.piece_at(pos("H1")), None);
        assert_eq!(board.piece_at(pos("E1")), None);
        assert!(board.castling_rights(Color::White).king_moved());
        assert!(!board.castling_rights(Color::Black).king_moved());
    }

    #[test]
    fn castles_queen_side_and_undoes() {
        let mut board = from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R b KQkq - 0 1");
        let before = board.clone();
        let info = board.move_piece(pos("E8"), pos("C8")).unwrap();
        assert_eq!(info.to_string(), "O-O-O");
        assert_eq!(board.piece_at(pos("C8")), k);
        assert_eq!(board.piece_at(pos("D8")), r);
        assert_eq!(board.piece_at(pos("A8")), None);

        board.undo_move();
        assert_eq!(board, before);
    }

    #[test]
    fn no_castling_after_king_moved() {
        let mut board = from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        board.move_piece(pos("E1"), pos("E2")).unwrap();
        board.move_piece(pos("E2"), pos("E1")).unwrap();
        let before = board.clone();
        assert_eq!(
            board.move_piece(pos("E1"), pos("G1")),
            Err(MoveError::Castling(CastlingError::KingMoved))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn no_castling_after_rook_moved() {
        let mut board = from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        board.move_piece(pos("H1"), pos("H2")).unwrap();
        board.move_piece(pos("H2"), pos("H1")).unwrap();
        assert_eq!(
            board.move_piece(pos("E1"), pos("G1")),
            Err(MoveError::Castling(CastlingError::RookMoved))
        );
        assert!(board.move_piece(pos("E1"), pos("C1")).is_ok());
    }

    #[test]
    fn fen_without_castling_letters_marks_rooks_moved() {
        let mut board = from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1");
        assert_eq!(
            board.move_piece(pos("E1"), pos("G1")),
            Err(MoveError::Castling(CastlingError::RookMoved))
        );
    }

    #[test]
    fn no_castling_through_pieces() {
        let mut board = from_fen("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1");
        assert_eq!(
            board.move_piece(pos("E1"), pos("C1")),
            Err(MoveError::Castling(CastlingError::PathBlocked(pos("B1"))))
        );
    }

    #[test]
    fn no_castling_through_attacked_square() {
        // the rook on F8 covers F1
        let mut board = from_fen("k4r2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert_eq!(
            board.move_piece(pos("E1"), pos("G1")),
            Err(MoveError::Castling(CastlingError::SquareAttacked(pos("F1"))))
        );
        assert!(board.move_piece(pos("E1"), pos("C1")).is_ok());
    }

    #[test]
    fn no_castling_out_of_check() {
        let mut board = from_fen("k3r3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert_eq!(
            board.move_piece(pos("E1"), pos("G1")),
            Err(MoveError::Castling(CastlingError::SquareAttacked(pos("E1"))))
        );
    }

    #[test]
    fn no_castling_into_check() {
        let mut board = from_fen("k5r1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert_eq!(
            board.move_piece(pos("E1"), pos("G1")),
            Err(MoveError::Castling(CastlingError::SquareAttacked(pos("G1"))))
        );
    }

    #[test]
    fn no_castling_without_rook() {
        let mut board = from_fen("k7/8/8/8/8/8/8/4K2R w KQ - 0 1");
        assert_eq!(
            board.move_piece(pos("E1"), pos("C1")),
            Err(MoveError::Castling(CastlingError::RookMissing))
        );
    }

    #[test]
    fn captured_corner_rook_cannot_castle() {
        let mut board = from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        board.move_piece(pos("A1"), pos("A8")).unwrap();
        assert!(board.castling_rights(Color::Black).rook_moved(CastleSide::Queen));
        assert!(!board.castling_rights(Color::Black).rook_moved(CastleSide::King));
        assert!(board.castling_rights(Color::White).rook_moved(CastleSide::Queen));
    }

    #[test]
    fn scholars_mate_is_checkmate() {
        let board = from_fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
        assert!(board.is_check(Color::Black));
        assert!(board.is_checkmate(Color::Black));
        assert!(!board.is_stalemate(Color::Black));
    }

    #[test]
    fn check_that_can_be_blocked_is_not_mate() {
        let board = from_fen("k3r3/8/8/8/8/8/3P1P2/3QK3 w - - 0 1");
        assert!(board.is_check(Color::White));
        assert!(!board.is_checkmate(Color::White));
    }

    #[test]
    fn back_rank_mate() {
        let board = from_fen("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert!(board.is_checkmate(Color::Black));
    }

    #[test]
    fn boxed_in_king_is_stalemate() {
        // none of the black pieces has a square to go to
        let board = from_fen("K7/8/8/8/8/8/6pp/6pk b - - 0 1");
        assert!(!board.is_check(Color::Black));
        assert!(board.is_stalemate(Color::Black));
        assert!(!board.is_checkmate(Color::Black));
        assert!(!board.is_stalemate(Color::White));
    }

    #[test]
    fn stalemate_counts_moves_into_check() {
        // the king has squares to go to, even though all of them are covered
        let board = from_fen("7k/8/6Q1/8/8/8/8/K7 b - - 0 1");
        assert!(!board.is_stalemate(Color::Black));
    }

    #[test]
    fn king_capture_ends_with_a_winner() {
        let mut board = from_fen("4k3/8/8/8/8/8/8/4RK2 w - - 0 1");
        assert!(board.is_check(Color::Black));
        let info = board.move_piece(pos("E1"), pos("E8")).unwrap();
        assert!(info.captured_king());
        assert!(board.is_king_captured());
        assert_eq!(board.winner(), Some(Color::White));

        board.undo_move();
        assert!(!board.is_king_captured());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn legal_moves_filter_self_check() {
        let board = from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(board.legal_moves(pos("E2")).is_empty());
        let king = board
            .legal_moves(pos("E1"))
            .into_iter()
            .map(|to| to.to_string())
            .sorted()
            .collect_vec();
        assert_eq!(king, ["D1", "D2", "F1", "F2"]);
    }

    #[test]
    fn legal_moves_include_castling() {
        let board = from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let moves = board.legal_moves(pos("E1"));
        assert!(moves.contains(&pos("G1")));
        assert!(moves.contains(&pos("C1")));

        let board = from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1");
        let moves = board.legal_moves(pos("E1"));
        assert!(!moves.contains(&pos("G1")));
        assert!(!moves.contains(&pos("C1")));
    }

    #[test]
    fn covered_king_has_no_legal_move() {
        // not a stalemate by the pseudo-legal count, but nothing can actually be played
        let board = from_fen("k7/2Q5/8/8/8/8/8/7K b - - 0 1");
        assert!(!board.is_check(Color::Black));
        assert!(!board.is_stalemate(Color::Black));
        assert!(!board.has_legal_move(Color::Black));
        assert!(board.has_legal_move(Color::White));
        assert!(Board::new().has_legal_move(Color::Black));
    }

    #[test]
    fn snapshot_matches_grid() {
        let board = Board::new();
        let snapshot = board.snapshot();
        assert_eq!(snapshot[0][4], k);
        assert_eq!(snapshot[7][4], K);
        assert_eq!(snapshot[4], [x; 8]);
    }

    #[test]
    fn draws_diagram() {
        let text = Board::new().to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "   A  B  C  D  E  F  G  H");
        assert_eq!(lines[1], "8  bR bN bB bQ bK bB bN bR  8");
        assert_eq!(lines[4], "5  ##    ##    ##    ##     5");
        assert_eq!(lines[8], "1  wR wN wB wQ wK wB wN wR  1");
    }
}
