//! Partial objective pattern.

use crate::board::Board;
use crate::error::{BoardError, Result};
use crate::values::PieceValues;
use crate::Value;

/// Required comparison values per cell; 0 is a wildcard.
///
/// Built from a grid naming piece identifiers, so "put piece 1 here" also
/// accepts any piece alike to 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    rows: usize,
    cols: usize,
    required: Vec<Value>,
}

impl Target {
    pub fn new(grid: &Board, values: &PieceValues, rows: usize, cols: usize) -> Result<Target> {
        if grid.rows() != rows || grid.cols() != cols {
            return Err(BoardError::TargetShape {
                rows,
                cols,
                target_rows: grid.rows(),
                target_cols: grid.cols(),
            });
        }

        let mut required = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let id = grid.get(row, col);
                if id != 0 && !values.knows(id) {
                    return Err(BoardError::UnknownTargetPiece { row, col, id });
                }
                required.push(values.value(id));
            }
        }

        Ok(Target {
            rows,
            cols,
            required,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major required values.
    #[inline]
    pub fn required(&self) -> &[Value] {
        &self.required
    }

    /// True when every required cell of the target matches `board`.
    ///
    /// An all-wildcard target never matches.
    pub fn matches(&self, board: &Board, values: &PieceValues) -> bool {
        debug_assert_eq!(board.cells().len(), self.required.len());
        let mut any = false;
        for (&want, &id) in self.required.iter().zip(board.cells()) {
            if want == 0 {
                continue;
            }
            any = true;
            if values.value(id) != want {
                return false;
            }
        }
        any
    }
}
