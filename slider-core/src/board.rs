//! Rectangular grid of piece identifiers.
//!
//! # Layout
//!
//! ```text
//! cells[row * cols + col]
//!   0      = empty
//!   id > 0 = occupied by piece `id`
//! ```

use std::fmt;

use crate::error::{BoardError, Result};
use crate::moves::Move;
use crate::PieceId;

/// A rows × cols grid, row-major.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<PieceId>,
}

impl Board {
    /// Build a board from rows of identifiers (0 = empty).
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Board> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        if rows.is_empty() || cols == 0 {
            return Err(BoardError::Empty);
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(BoardError::Ragged {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                let id = PieceId::try_from(value).map_err(|_| BoardError::IdOutOfRange {
                    row,
                    col,
                    value: value as u64,
                    max: PieceId::MAX,
                })?;
                cells.push(id);
            }
        }

        Ok(Board {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// All-empty board of the given size.
    pub fn empty(rows: usize, cols: usize) -> Board {
        Board {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major cell slice.
    #[inline]
    pub fn cells(&self) -> &[PieceId] {
        &self.cells
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> PieceId {
        self.cells[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, id: PieceId) {
        self.cells[row * self.cols + col] = id;
    }

    /// Cell at signed coordinates, or `None` when off the board.
    #[inline]
    pub fn get_signed(&self, row: i32, col: i32) -> Option<PieceId> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            None
        } else {
            Some(self.get(row as usize, col as usize))
        }
    }

    /// Largest identifier on the board (0 for an empty board).
    pub fn max_id(&self) -> PieceId {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Copy back into nested rows, the same shape `from_rows` accepts.
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|&id| id as u32).collect())
            .collect()
    }

    /// Apply `mov` to a copy of this board by relocating every cell holding
    /// the piece, without consulting its shape.
    ///
    /// Returns `None` when the piece is absent or a destination cell is off
    /// the board or held by another piece.
    pub fn translated(&self, mov: &Move) -> Option<Board> {
        let mut occupied = Vec::new();
        for (i, &id) in self.cells.iter().enumerate() {
            if id == mov.piece {
                occupied.push((i / self.cols, i % self.cols));
            }
        }
        if occupied.is_empty() {
            return None;
        }

        for &(row, col) in &occupied {
            let dest =
                self.get_signed(row as i32 + mov.d_row as i32, col as i32 + mov.d_col as i32)?;
            if dest != 0 && dest != mov.piece {
                return None;
            }
        }

        let mut next = self.clone();
        for &(row, col) in &occupied {
            next.set(row, col, 0);
        }
        for &(row, col) in &occupied {
            let r = (row as i32 + mov.d_row as i32) as usize;
            let c = (col as i32 + mov.d_col as i32) as usize;
            next.set(r, c, mov.piece);
        }
        Some(next)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.max_id().to_string().len();
        for row in self.cells.chunks(self.cols) {
            let line: Vec<String> = row
                .iter()
                .map(|&id| {
                    if id == 0 {
                        format!("{:>width$}", ".")
                    } else {
                        format!("{id:>width$}")
                    }
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
