//! Errors raised while building a puzzle from its input grids.

use thiserror::Error;

use crate::PieceId;

/// Malformed board, target or alike-piece configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("grid has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell ({row},{col}) holds {value}, larger than the maximum piece id {max}")]
    IdOutOfRange {
        row: usize,
        col: usize,
        value: u64,
        max: PieceId,
    },

    #[error("board has no pieces")]
    NoPieces,

    #[error("target is {target_rows}x{target_cols} but the board is {rows}x{cols}")]
    TargetShape {
        rows: usize,
        cols: usize,
        target_rows: usize,
        target_cols: usize,
    },

    #[error("target cell ({row},{col}) names piece {id}, which is not on the board")]
    UnknownTargetPiece { row: usize, col: usize, id: PieceId },

    #[error("alike configuration names piece {0}, which is not on the board")]
    UnknownAlikePiece(PieceId),

    #[error("move of piece {piece} has non-unit delta ({d_row},{d_col})")]
    NonUnitMove { piece: PieceId, d_row: i8, d_col: i8 },
}

pub type Result<T> = std::result::Result<T, BoardError>;
