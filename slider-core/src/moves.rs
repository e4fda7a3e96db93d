//! Single-cell piece translations and move-chain metrics.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::PieceId;

/// Axis-aligned unit step.
///
/// Variants are listed in generation order: the move generator always tries
/// a piece's directions in this order.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Direction {
    Down,
    Up,
    Right,
    Left,
}

impl Direction {
    /// All directions in generation order.
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Right,
        Direction::Left,
    ];

    /// (Δrow, Δcol) of one step.
    #[inline]
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Down => (1, 0),
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Left => (0, -1),
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }
}

/// Translation of one piece by one cell.
///
/// Invariant: `|d_row| + |d_col| == 1`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMove")]
pub struct Move {
    pub piece: PieceId,
    pub d_row: i8,
    pub d_col: i8,
}

#[derive(Deserialize)]
struct RawMove {
    piece: PieceId,
    d_row: i8,
    d_col: i8,
}

impl TryFrom<RawMove> for Move {
    type Error = BoardError;

    fn try_from(raw: RawMove) -> Result<Move, BoardError> {
        Move::from_delta(raw.piece, raw.d_row, raw.d_col).ok_or(BoardError::NonUnitMove {
            piece: raw.piece,
            d_row: raw.d_row,
            d_col: raw.d_col,
        })
    }
}

impl Move {
    #[inline]
    pub fn new(piece: PieceId, dir: Direction) -> Move {
        let (d_row, d_col) = dir.delta();
        Move { piece, d_row, d_col }
    }

    /// Build a move from raw deltas, or `None` if they are not a unit step.
    pub fn from_delta(piece: PieceId, d_row: i8, d_col: i8) -> Option<Move> {
        if d_row.unsigned_abs() as u16 + d_col.unsigned_abs() as u16 == 1 {
            Some(Move { piece, d_row, d_col })
        } else {
            None
        }
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        match (self.d_row, self.d_col) {
            (1, 0) => Direction::Down,
            (-1, 0) => Direction::Up,
            (0, 1) => Direction::Right,
            (0, -1) => Direction::Left,
            (r, c) => panic!("move of piece {} has non-unit delta ({r},{c})", self.piece),
        }
    }

    /// Same piece, opposite delta.
    #[inline]
    pub fn inverse(&self) -> Move {
        Move {
            piece: self.piece,
            d_row: -self.d_row,
            d_col: -self.d_col,
        }
    }

    #[inline]
    pub fn is_inverse(&self, other: &Move) -> bool {
        self.piece == other.piece
            && self.d_row + other.d_row == 0
            && self.d_col + other.d_col == 0
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]~({}, {})", self.piece, self.d_row, self.d_col)
    }
}

/// Number of maximal runs of consecutive same-piece moves.
///
/// This is the move metric: sliding one piece several cells in a row counts
/// as a single move.
pub fn collapsed_length(chain: &[Move]) -> u32 {
    let mut runs = 0;
    let mut last: Option<PieceId> = None;
    for mov in chain {
        if last != Some(mov.piece) {
            runs += 1;
            last = Some(mov.piece);
        }
    }
    runs
}

/// Trailing run of moves made by the piece that moved last.
pub fn trailing_run(chain: &[Move]) -> &[Move] {
    let Some(last) = chain.last() else {
        return &[];
    };
    let start = chain
        .iter()
        .rposition(|m| m.piece != last.piece)
        .map_or(0, |i| i + 1);
    &chain[start..]
}
