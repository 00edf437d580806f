//! Setting up positions from [FEN](https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation)
//! strings.
//!
//! Only the piece placement, the side to move and the castling field are used. The en passant
//! square and the move counters may follow and are ignored.

use either::Either;
use nom::{
    branch::alt,
    character::complete::{char as nchar, digit1, one_of},
    combinator::opt,
    multi::many_m_n,
    sequence::tuple,
    IResult, Parser,
};

use crate::{Color, Piece, PieceKind, Position};

use super::{
    board::{Board, CastlingRights},
    grid::Grid,
};

/// Error that arises from parsing a FEN string
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum FenError {
    /// something was left over after the last field
    #[error("trailing characters")]
    TrailingChars,

    /// the string does not have the shape of a FEN string
    #[error("failed to parse near \"{0}\"")]
    ParseError(String),

    /// a rank describes more or fewer than eight squares
    #[error("rank {0} is not eight squares wide")]
    RankWidth(u8),

    /// a side has no king or more than one
    #[error("{0} has {1} kings, expected exactly one")]
    KingCount(Color, usize),
}

#[derive(Debug, PartialEq, Eq)]
pub(super) struct Fen {
    pub(super) board: Board,
    pub(super) to_move: Color,
}

/// Parses a FEN string into a fresh board and the side to move
pub(super) fn parse(s: &str) -> Result<Fen, FenError> {
    let (rest, (ranks, _, to_move, _, (castling_white, castling_black), _)) = tuple((
        piece_placement,
        nchar(' '),
        side_to_move,
        nchar(' '),
        castling_ability,
        opt(ignored_fields),
    ))(s)
    .map_err(|err| match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => FenError::ParseError(e.input.to_owned()),
        nom::Err::Incomplete(_) => FenError::ParseError(String::new()),
    })?;

    if !rest.is_empty() {
        return Err(FenError::TrailingChars);
    }

    let grid = build_grid(ranks)?;
    for color in [Color::White, Color::Black] {
        let kings = grid
            .pieces_of(color)
            .filter(|(_, piece)| piece.is_king())
            .count();
        if kings != 1 {
            return Err(FenError::KingCount(color, kings));
        }
    }

    Ok(Fen {
        board: Board::with_grid(grid, castling_white, castling_black),
        to_move,
    })
}

#[derive(Debug, PartialEq, Eq)]
enum Field {
    /// a piece
    Piece(Piece),
    /// `self.0` empty fields
    Empty(u8),
}

impl Field {
    fn width(&self) -> u8 {
        match self {
            Field::Piece(_) => 1,
            Field::Empty(n) => *n,
        }
    }
}

fn field(s: &str) -> IResult<&str, Field> {
    let (s, x) = one_of("rnbqkpRNBQKP12345678")(s)?;
    let kind = match x.to_ascii_lowercase() {
        'r' => PieceKind::Rook,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        'p' => PieceKind::Pawn,
        digit => return Ok((s, Field::Empty(digit as u8 - b'0'))),
    };
    let color = if x.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    Ok((s, Field::Piece(Piece::new(kind, color))))
}

fn side_to_move(s: &str) -> IResult<&str, Color> {
    let (s, color) = one_of("wb")(s)?;
    let color = if color == 'w' {
        Color::White
    } else {
        Color::Black
    };
    Ok((s, color))
}

fn rank(s: &str) -> IResult<&str, Vec<Field>> {
    many_m_n(1, 8, field)(s)
}

fn piece_placement(s: &str) -> IResult<&str, Vec<Vec<Field>>> {
    let (s, before) = many_m_n(7, 7, tuple((rank, nchar('/'))))(s)?;
    let (s, last) = rank(s)?;

    let mut ranks: Vec<_> = before.into_iter().map(|(fields, _)| fields).collect();
    ranks.push(last);
    Ok((s, ranks))
}

fn build_grid(ranks: Vec<Vec<Field>>) -> Result<Grid, FenError> {
    let mut grid = Grid::empty();
    for (row, fields) in (0..8u8).zip(ranks) {
        let width: u8 = fields.iter().map(Field::width).sum();
        if width != 8 {
            return Err(FenError::RankWidth(8 - row));
        }

        let mut col = 0;
        for field in fields {
            if let Field::Piece(piece) = field {
                grid[Position::new(row, col)] = Some(piece);
            }
            col += field.width();
        }
    }
    Ok(grid)
}

/// A missing letter means that rook has moved.
fn castling_ability(s: &str) -> IResult<&str, (CastlingRights, CastlingRights)> {
    let (s, castling) = alt((
        nchar('-').map(Either::Left),
        tuple((
            opt(nchar('K')),
            opt(nchar('Q')),
            opt(nchar('k')),
            opt(nchar('q')),
        ))
        .map(Either::Right),
    ))(s)?;

    let rights = match castling {
        Either::Left(_) => (CastlingRights::none(), CastlingRights::none()),
        Either::Right((wk, wq, bk, bq)) => (
            CastlingRights::with_rooks(wk.is_some(), wq.is_some()),
            CastlingRights::with_rooks(bk.is_some(), bq.is_some()),
        ),
    };

    Ok((s, rights))
}

/// en passant square, halfmove clock and fullmove number
fn ignored_fields(s: &str) -> IResult<&str, ()> {
    let en_passant = alt((
        nchar('-').map(|_| ()),
        tuple((one_of("abcdefgh"), one_of("36"))).map(|_| ()),
    ));
    let counters = tuple((nchar(' '), digit1, nchar(' '), digit1));
    let (s, _) = tuple((nchar(' '), en_passant, opt(counters)))(s)?;
    Ok((s, ()))
}
