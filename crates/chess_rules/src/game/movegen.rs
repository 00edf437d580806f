//! Pseudo-legal move generation: where each kind of piece may go, given the occupancy of the grid,
//! without asking whether the move exposes its own king.

use crate::{Color, Piece, PieceKind, Position};
use directions::{EightWayDirection, FourWayDirection, Offset};

use super::Grid;

mod directions {
    pub(super) trait Offset {
        /// `(row, column)` offset of a step of `distance` squares in this direction
        #[must_use]
        fn offset(self, distance: u8) -> (i8, i8);

        #[must_use]
        fn rotate_once(self) -> Option<Self>
        where
            Self: Sized;
    }

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub(super) enum FourWayDirection {
        #[default]
        Top,
        Right,
        Bottom,
        Left,
    }

    impl Offset for FourWayDirection {
        #[must_use]
        fn offset(self, distance: u8) -> (i8, i8) {
            use FourWayDirection::*;
            let distance = distance as i8;
            match self {
                Top => (-distance, 0),
                Right => (0, distance),
                Bottom => (distance, 0),
                Left => (0, -distance),
            }
        }

        #[must_use]
        fn rotate_once(self) -> Option<Self>
        where
            Self: Sized,
        {
            match self {
                FourWayDirection::Top => Some(Self::Right),
                FourWayDirection::Right => Some(Self::Bottom),
                FourWayDirection::Bottom => Some(Self::Left),
                FourWayDirection::Left => None,
            }
        }
    }

    impl FourWayDirection {
        #[must_use]
        pub(super) fn offset_diagonal(self, distance: u8) -> (i8, i8) {
            use FourWayDirection::*;
            let distance = distance as i8;
            match self {
                Top => (-distance, distance),
                Right => (distance, distance),
                Bottom => (distance, -distance),
                Left => (-distance, -distance),
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub(super) enum EightWayDirection {
        #[default]
        Top,
        TopRight,
        Right,
        BottomRight,
        Bottom,
        BottomLeft,
        Left,
        TopLeft,
    }

    impl Offset for EightWayDirection {
        #[must_use]
        fn offset(self, distance: u8) -> (i8, i8) {
            use EightWayDirection::*;
            let distance = distance as i8;
            match self {
                Top => (-distance, 0),
                Right => (0, distance),
                Bottom => (distance, 0),
                Left => (0, -distance),
                TopRight => (-distance, distance),
                BottomRight => (distance, distance),
                BottomLeft => (distance, -distance),
                TopLeft => (-distance, -distance),
            }
        }

        #[must_use]
        fn rotate_once(self) -> Option<Self>
        where
            Self: Sized,
        {
            use EightWayDirection::*;
            match self {
                Top => Some(TopRight),
                TopRight => Some(Right),
                Right => Some(BottomRight),
                BottomRight => Some(Bottom),
                Bottom => Some(BottomLeft),
                BottomLeft => Some(Left),
                Left => Some(TopLeft),
                TopLeft => None,
            }
        }
    }
}

/// Combines the creation and usage of a Iterator over Piece moves
pub trait Mover<'a>: Iterator<Item = Position> + Sized {
    /// Creates the moves of a piece of the given color standing on `pos`. The piece does not
    /// have to exist on the grid for this function to work.
    fn new_with_color(pos: Position, grid: &'a Grid, color: Color) -> Self;
}

/// Walks rays outwards from a square, one direction after another. A ray ends at the edge of the
/// board, before a piece of the own color, or on the first enemy piece.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Rotator<T> {
    directions: Option<T>,
    distance: u8,
}

impl<T> Rotator<T>
where
    T: PartialEq + Copy + Offset + std::fmt::Debug + Default,
{
    fn new() -> Self {
        Self {
            directions: Some(T::default()),
            distance: 1,
        }
    }

    fn rotate_once(&mut self) {
        if let Some(direction) = self.directions {
            self.directions = direction.rotate_once();
            self.distance = 1;
        }
    }

    #[inline]
    fn next(&mut self, pos: Position, grid: &Grid, own_color: Color) -> Option<Position> {
        self.next_with(pos, grid, own_color, <T as Offset>::offset)
    }

    #[inline]
    fn next_with(
        &mut self,
        pos: Position,
        grid: &Grid,
        own_color: Color,
        f: impl Fn(T, u8) -> (i8, i8),
    ) -> Option<Position> {
        loop {
            let direction = self.directions?;
            let offset = f(direction, self.distance);
            let Some(target) = pos + offset else {
                self.rotate_once();
                continue;
            };
            match grid[target] {
                // can't capture own piece
                Some(piece) if piece.color() == own_color => {
                    self.rotate_once();
                    continue;
                }
                // can capture enemy piece
                Some(_) => {
                    self.rotate_once();
                    return Some(target);
                }
                // can move on empty square
                None => {
                    self.distance += 1;
                    return Some(target);
                }
            }
        }
    }
}

/// Iterator over the possible moves that the rook can make.
///
/// Construct this via the [`Mover`] trait or via [`PieceMove`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RookMove<'a> {
    pos: Position,
    grid: &'a Grid,
    rotator: Rotator<FourWayDirection>,
    color: Color,
}

impl<'a> Mover<'a> for RookMove<'a> {
    fn new_with_color(pos: Position, grid: &'a Grid, color: Color) -> Self {
        Self {
            pos,
            grid,
            color,
            rotator: Rotator::new(),
        }
    }
}

impl<'a> Iterator for RookMove<'a> {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.rotator.next(self.pos, self.grid, self.color)
    }
}

/// Iterator over the possible moves that the bishop can make.
///
/// Construct this via the [`Mover`] trait or via [`PieceMove`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BishopMove<'a> {
    pos: Position,
    grid: &'a Grid,
    rotator: Rotator<FourWayDirection>,
    color: Color,
}

impl<'a> Mover<'a> for BishopMove<'a> {
    fn new_with_color(pos: Position, grid: &'a Grid, color: Color) -> Self {
        Self {
            pos,
            grid,
            color,
            rotator: Rotator::new(),
        }
    }
}

impl<'a> Iterator for BishopMove<'a> {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.rotator.next_with(
            self.pos,
            self.grid,
            self.color,
            FourWayDirection::offset_diagonal,
        )
    }
}

/// Iterator over the possible moves that the queen can make.
///
/// Construct this via the [`Mover`] trait or via [`PieceMove`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueenMove<'a> {
    pos: Position,
    grid: &'a Grid,
    rotator: Rotator<EightWayDirection>,
    color: Color,
}

impl<'a> Mover<'a> for QueenMove<'a> {
    fn new_with_color(pos: Position, grid: &'a Grid, color: Color) -> Self {
        Self {
            pos,
            grid,
            color,
            rotator: Rotator::new(),
        }
    }
}

impl<'a> Iterator for QueenMove<'a> {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.rotator.next(self.pos, self.grid, self.color)
    }
}

/// Iterator over the possible moves that the knight can make.
///
/// Construct this via the [`Mover`] trait or via [`PieceMove`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnightMove<'a> {
    rotation: Option<EightWayDirection>,
    pos: Position,
    grid: &'a Grid,
    color: Color,
}

impl<'a> Mover<'a> for KnightMove<'a> {
    fn new_with_color(pos: Position, grid: &'a Grid, color: Color) -> Self {
        Self {
            pos,
            color,
            grid,
            rotation: Some(EightWayDirection::Top),
        }
    }
}

impl<'a> KnightMove<'a> {
    fn offset(dir: EightWayDirection) -> (i8, i8) {
        use EightWayDirection::*;
        match dir {
            Top => (-2, -1),
            TopRight => (-2, 1),
            Right => (-1, 2),
            BottomRight => (1, 2),
            Bottom => (2, 1),
            BottomLeft => (2, -1),
            Left => (1, -2),
            TopLeft => (-1, -2),
        }
    }
}

impl<'a> Iterator for KnightMove<'a> {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rot = self.rotation?;
            self.rotation = rot.rotate_once();

            let Some(target) = self.pos + Self::offset(rot) else {
                continue;
            };
            match self.grid[target] {
                Some(piece) if piece.color() == self.color => continue,
                Some(_) | None => return Some(target),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum PawnDir {
    #[default]
    PushOne,
    PushTwo,
    CaptureLeft,
    CaptureRight,
}

impl PawnDir {
    fn requires_capture(&self) -> bool {
        match self {
            PawnDir::PushOne | PawnDir::PushTwo => false,
            PawnDir::CaptureLeft | PawnDir::CaptureRight => true,
        }
    }

    #[inline]
    fn next(self) -> Option<Self> {
        match self {
            PawnDir::PushOne => Some(PawnDir::PushTwo),
            PawnDir::PushTwo => Some(PawnDir::CaptureLeft),
            PawnDir::CaptureLeft => Some(PawnDir::CaptureRight),
            PawnDir::CaptureRight => None,
        }
    }
}

/// Iterator over the possible moves that the pawn can make.
///
/// Pushes one square onto an empty square, two squares from the starting row when both squares
/// are empty, and captures diagonally forward onto enemy pieces only.
///
/// Construct this via the [`Mover`] trait or via [`PieceMove`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PawnMove<'a> {
    pos: Position,
    grid: &'a Grid,
    color: Color,
    is_blocked: bool,
    push_two: bool,
    dir: Option<PawnDir>,
}

impl<'a> Mover<'a> for PawnMove<'a> {
    fn new_with_color(pos: Position, grid: &'a Grid, color: Color) -> Self {
        Self {
            pos,
            color,
            grid,
            push_two: pos.row() == color.pawn_row(),
            dir: Some(PawnDir::PushOne),
            is_blocked: false,
        }
    }
}

impl<'a> PawnMove<'a> {
    fn offset(&self, pawn_dir: PawnDir) -> (i8, i8) {
        use PawnDir::*;
        let forward = self.color.forward();

        match pawn_dir {
            PushOne => (forward, 0),
            PushTwo => (2 * forward, 0),
            CaptureLeft => (forward, -1),
            CaptureRight => (forward, 1),
        }
    }
}

impl<'a> Iterator for PawnMove<'a> {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let pawn_dir = self.dir?;
            self.dir = pawn_dir.next();

            if matches!(pawn_dir, PawnDir::PushOne) {
                self.is_blocked = true;
            }

            match pawn_dir {
                PawnDir::PushTwo if !self.push_two => continue,
                PawnDir::PushTwo if self.is_blocked => continue,
                _ => (),
            }

            let Some(pos) = self.pos + self.offset(pawn_dir) else {
                continue;
            };

            match self.grid[pos] {
                Some(piece) if piece.color() == self.color => continue,
                Some(_) if pawn_dir.requires_capture() => return Some(pos),
                None if pawn_dir.requires_capture() => continue,
                // pushes never capture
                Some(_) => continue,
                None => {
                    self.is_blocked = false;
                    return Some(pos);
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum KingsMoves {
    Rotating(EightWayDirection),
    Castle,
    LongCastle,
    None,
}

/// Iterator over the possible moves that the king can make.
///
/// Standing on its home square, the king also offers the two castling destinations two columns
/// away, if they are empty. Whether castling is actually allowed is decided by the
/// [`Board`](super::Board).
///
/// Construct this via the [`Mover`] trait or via [`PieceMove`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KingMove<'a> {
    rotation: KingsMoves,
    castling: bool,
    pos: Position,
    grid: &'a Grid,
    color: Color,
}

impl<'a> Mover<'a> for KingMove<'a> {
    fn new_with_color(pos: Position, grid: &'a Grid, color: Color) -> Self {
        Self {
            pos,
            color,
            grid,
            castling: pos == Self::home(color),
            rotation: KingsMoves::Rotating(EightWayDirection::Top),
        }
    }
}

impl<'a> KingMove<'a> {
    /// the square a king of the given color starts the game on
    pub fn home(color: Color) -> Position {
        Position::new(color.home_row(), 4)
    }

    /// the squares the king attacks, i.e. without castling candidates
    pub fn without_castling(pos: Position, grid: &'a Grid, color: Color) -> Self {
        Self {
            castling: false,
            ..Self::new_with_color(pos, grid, color)
        }
    }

    fn castling_candidate(&self, col: u8) -> Option<Position> {
        let target = Position::new(self.pos.row(), col);
        self.grid[target].is_none().then_some(target)
    }
}

impl<'a> Iterator for KingMove<'a> {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.rotation {
                KingsMoves::Rotating(rot) => {
                    self.rotation = match rot.rotate_once() {
                        Some(next) => KingsMoves::Rotating(next),
                        None if self.castling => KingsMoves::Castle,
                        None => KingsMoves::None,
                    };

                    let Some(target) = self.pos + rot.offset(1) else {
                        continue;
                    };
                    match self.grid[target] {
                        Some(piece) if piece.color() == self.color => continue,
                        Some(_) | None => return Some(target),
                    }
                }
                KingsMoves::Castle => {
                    self.rotation = KingsMoves::LongCastle;
                    happy_try!(self.castling_candidate(6));
                }
                KingsMoves::LongCastle => {
                    self.rotation = KingsMoves::None;
                    happy_try!(self.castling_candidate(2));
                }
                KingsMoves::None => return None,
            }
        }
    }
}

/// Unifies the moves of a piece, independent of what piece exactly it is.
///
/// ```
/// # use chess_rules::{Board, Position};
/// let board = Board::new();
/// let moves: Vec<_> = board.possible_moves("G1".parse().unwrap())
///                          .expect("there is a piece at G1")
///                          .collect();
/// assert!(moves.contains(&"F3".parse().unwrap()));
/// assert!(moves.contains(&"H3".parse().unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PieceMove<'a> {
    /// the piece is a pawn
    Pawn(PawnMove<'a>),
    /// the piece is a rook
    Rook(RookMove<'a>),
    /// the piece is a knight
    Knight(KnightMove<'a>),
    /// the piece is a bishop
    Bishop(BishopMove<'a>),
    /// the piece is a queen
    Queen(QueenMove<'a>),
    /// the piece is a king
    King(KingMove<'a>),
}

impl<'a> PieceMove<'a> {
    /// creates a new [`PieceMove`] from the piece, taking its kind, color, and position
    pub fn new_with_piece(pos: Position, grid: &'a Grid, piece: Piece) -> Self {
        let color = piece.color();
        match piece.kind() {
            PieceKind::Pawn => Self::Pawn(PawnMove::new_with_color(pos, grid, color)),
            PieceKind::Rook => Self::Rook(RookMove::new_with_color(pos, grid, color)),
            PieceKind::Knight => Self::Knight(KnightMove::new_with_color(pos, grid, color)),
            PieceKind::Bishop => Self::Bishop(BishopMove::new_with_color(pos, grid, color)),
            PieceKind::Queen => Self::Queen(QueenMove::new_with_color(pos, grid, color)),
            PieceKind::King => Self::King(KingMove::new_with_color(pos, grid, color)),
        }
    }

    /// like [`PieceMove::new_with_piece`], but a king leaves out its castling candidates. These are
    /// the squares the piece could capture on.
    pub fn attacks(pos: Position, grid: &'a Grid, piece: Piece) -> Self {
        match piece.kind() {
            PieceKind::King => Self::King(KingMove::without_castling(pos, grid, piece.color())),
            _ => Self::new_with_piece(pos, grid, piece),
        }
    }

    /// gets the color of the piece that is moving
    pub fn color(&self) -> Color {
        match self {
            PieceMove::Pawn(inner) => inner.color,
            PieceMove::Rook(inner) => inner.color,
            PieceMove::Knight(inner) => inner.color,
            PieceMove::Bishop(inner) => inner.color,
            PieceMove::Queen(inner) => inner.color,
            PieceMove::King(inner) => inner.color,
        }
    }

    /// gets the starting position that the piece is coming from
    pub fn from(&self) -> Position {
        match self {
            PieceMove::Pawn(inner) => inner.pos,
            PieceMove::Rook(inner) => inner.pos,
            PieceMove::Knight(inner) => inner.pos,
            PieceMove::Bishop(inner) => inner.pos,
            PieceMove::Queen(inner) => inner.pos,
            PieceMove::King(inner) => inner.pos,
        }
    }
}

impl<'a> Iterator for PieceMove<'a> {
    type Item = Position;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self {
            PieceMove::Pawn(inner) => inner.next(),
            PieceMove::Rook(inner) => inner.next(),
            PieceMove::Knight(inner) => inner.next(),
            PieceMove::Bishop(inner) => inner.next(),
            PieceMove::Queen(inner) => inner.next(),
            PieceMove::King(inner) => inner.next(),
        }
    }
}
