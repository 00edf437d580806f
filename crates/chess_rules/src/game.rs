//! Playing a game: the [`Game`] controller on top of the [`Board`], plus the move generation and
//! position setup it is built from.

use std::{fmt::Display, str::FromStr};

use crate::{Color, Position};

mod board;
mod fen;
mod grid;
mod movegen;

pub use board::{Board, CastleSide, CastlingError, CastlingRights, MoveError, MoveInfo};
pub use fen::FenError;
pub use grid::{EnumeratePieces, Grid};
pub use movegen::{
    BishopMove, KingMove, KnightMove, Mover, PawnMove, PieceMove, QueenMove, RookMove,
};

/// The state of play for one side, as reported by [`Game::check_outcome`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// nothing special, play goes on
    None,
    /// the given side is in check
    Check(Color),
    /// the given side is checkmated and has lost
    Checkmate(Color),
    /// the given side cannot move but is not in check
    Stalemate(Color),
    /// a king has been taken
    KingCaptured {
        /// the side that took the king
        winner: Color,
    },
}

impl MoveOutcome {
    /// Returns `true` if the game cannot go on from here
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            MoveOutcome::Checkmate(_) | MoveOutcome::Stalemate(_) | MoveOutcome::KingCaptured { .. }
        )
    }

    /// The result in the usual notation: `1-0`, `0-1` or `1/2-1/2`. Games still in progress have
    /// none.
    pub fn result(&self) -> Option<&'static str> {
        match self {
            MoveOutcome::None | MoveOutcome::Check(_) => None,
            MoveOutcome::Stalemate(_) => Some("1/2-1/2"),
            MoveOutcome::Checkmate(loser) => Some(loser.other().win_result()),
            MoveOutcome::KingCaptured { winner } => Some(winner.win_result()),
        }
    }
}

/// Runs a game: keeps track of whose turn it is and whether the game is still going, and passes
/// moves on to the [`Board`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    /// Which side is next to move
    to_move: Color,
    active: bool,
}

impl Game {
    /// A game in the standard opening position, white to move
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            to_move: Color::White,
            active: true,
        }
    }

    /// the board the game is played on
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// which side is next to move
    pub fn player_to_move(&self) -> Color {
        self.to_move
    }

    /// Returns `true` until a king is taken, a side is checkmated or stalemated, or the game is
    /// ended by [`Game::end_game`]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Throws away the current game and sets up a new one
    pub fn new_game(&mut self) {
        *self = Self::new();
    }

    /// Stops play, for example because a side resigned. Moves are refused afterwards, but the
    /// game can be continued with [`Game::undo_move`].
    pub fn end_game(&mut self) {
        self.active = false;
    }

    /// Attempts to make a move for the side whose turn it is, returning Err if the given move
    /// was not valid.
    pub fn try_make_move(&mut self, from: Position, to: Position) -> Result<MoveInfo, MoveError> {
        if !self.active {
            return Err(MoveError::GameOver);
        }
        let piece = self
            .board
            .piece_at(from)
            .ok_or(MoveError::NoPiece(from))?;
        if piece.color() != self.to_move {
            return Err(MoveError::NotYourTurn {
                expected: self.to_move,
            });
        }

        let info = self.board.move_piece(from, to)?;
        self.to_move.flip();
        if self.check_outcome().is_final() {
            self.active = false;
        }
        Ok(info)
    }

    /// Like [`Game::try_make_move`], but only tells whether the move was made
    pub fn make_move(&mut self, from: Position, to: Position) -> bool {
        self.try_make_move(from, to).is_ok()
    }

    /// Takes back the last move and gives the turn back to the side that made it. An ended game
    /// becomes active again. Returns `false` if there is nothing to take back.
    pub fn undo_move(&mut self) -> bool {
        let Some(info) = self.board.undo_move() else {
            return false;
        };
        self.to_move = info.piece.color();
        self.active = true;
        true
    }

    /// Returns `true` if `color` is in check
    pub fn is_check(&self, color: Color) -> bool {
        self.board.is_check(color)
    }

    /// Returns `true` if `color` is checkmated
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.board.is_checkmate(color)
    }

    /// Returns `true` if `color` is stalemated
    pub fn is_stalemate(&self, color: Color) -> bool {
        self.board.is_stalemate(color)
    }

    /// Returns `true` if a king has been taken
    pub fn is_king_captured(&self) -> bool {
        self.board.is_king_captured()
    }

    /// The side that took the opposing king, if that happened
    pub fn winner(&self) -> Option<Color> {
        self.board.winner()
    }

    /// How things stand for the side to move.
    ///
    /// ```
    /// # use chess_rules::{Color, Game, MoveOutcome};
    /// let game: Game = "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4"
    ///     .parse()
    ///     .unwrap();
    /// assert_eq!(game.check_outcome(), MoveOutcome::Checkmate(Color::Black));
    /// ```
    pub fn check_outcome(&self) -> MoveOutcome {
        let color = self.to_move;
        if let Some(winner) = self.board.winner() {
            MoveOutcome::KingCaptured { winner }
        } else if self.board.is_checkmate(color) {
            MoveOutcome::Checkmate(color)
        } else if self.board.is_check(color) {
            MoveOutcome::Check(color)
        } else if self.board.is_stalemate(color) {
            MoveOutcome::Stalemate(color)
        } else {
            MoveOutcome::None
        }
    }

    /// Parses a [FEN](https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation) string.
    ///
    /// ### Examples
    /// ```
    /// # use chess_rules::Game;
    /// let game: Game = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    ///                 .parse()
    ///                 .unwrap();
    /// assert_eq!(game, Game::new());
    /// ```
    pub fn from_fen(s: &str) -> Result<Self, FenError> {
        let fen::Fen { board, to_move } = fen::parse(s)?;
        let mut game = Game {
            board,
            to_move,
            active: true,
        };
        game.active = !game.check_outcome().is_final();
        Ok(game)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.board)
    }
}

impl FromStr for Game {
    type Err = FenError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}
