//! Rigid pieces extracted from the initial board.

use crate::board::Board;
use crate::{PieceId, Value};

/// A rigid piece: fixed shape, movable anchor.
///
/// The anchor is the top-left corner of the piece's bounding box. Shape
/// offsets are relative to the anchor and kept in row-major order, so two
/// pieces have the same shape exactly when their offset lists are equal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    id: PieceId,
    value: Value,
    shape: Vec<(u16, u16)>,
    /// Offset of the first cell met in a row-major scan.
    lead: (u16, u16),
    row: i32,
    col: i32,
}

impl Piece {
    #[inline]
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// Comparison value; alike pieces share it.
    #[inline]
    pub fn value(&self) -> Value {
        self.value
    }

    #[inline]
    pub(crate) fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    #[inline]
    pub fn shape(&self) -> &[(u16, u16)] {
        &self.shape
    }

    /// Anchor position (row, col).
    #[inline]
    pub fn position(&self) -> (i32, i32) {
        (self.row, self.col)
    }

    #[inline]
    pub fn same_shape(&self, other: &Piece) -> bool {
        self.shape == other.shape
    }

    #[inline]
    pub(crate) fn translate(&mut self, d_row: i8, d_col: i8) {
        self.row += d_row as i32;
        self.col += d_col as i32;
    }

    /// Re-anchor from the first cell found by a row-major scan.
    #[inline]
    pub(crate) fn place_from_lead(&mut self, row: usize, col: usize) {
        self.row = row as i32 - self.lead.0 as i32;
        self.col = col as i32 - self.lead.1 as i32;
    }

    /// Absolute cells currently covered, shifted by (d_row, d_col).
    pub fn cells_shifted(&self, d_row: i8, d_col: i8) -> impl Iterator<Item = (i32, i32)> + '_ {
        let base_row = self.row + d_row as i32;
        let base_col = self.col + d_col as i32;
        self.shape
            .iter()
            .map(move |&(r, c)| (base_row + r as i32, base_col + c as i32))
    }

    /// Absolute cells currently covered.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells_shifted(0, 0)
    }
}

/// One piece per distinct positive identifier, in order of first appearance
/// (row-major). Every piece starts with its own id as comparison value.
pub fn extract_pieces(board: &Board) -> Vec<Piece> {
    let mut order: Vec<PieceId> = Vec::new();
    let mut cells_by_id: Vec<Vec<(usize, usize)>> = vec![Vec::new(); board.max_id() as usize + 1];

    for row in 0..board.rows() {
        for col in 0..board.cols() {
            let id = board.get(row, col);
            if id == 0 {
                continue;
            }
            let cells = &mut cells_by_id[id as usize];
            if cells.is_empty() {
                order.push(id);
            }
            cells.push((row, col));
        }
    }

    order
        .into_iter()
        .map(|id| {
            let cells = &cells_by_id[id as usize];
            let min_row = cells.iter().map(|&(r, _)| r).min().unwrap_or(0);
            let min_col = cells.iter().map(|&(_, c)| c).min().unwrap_or(0);
            let shape: Vec<(u16, u16)> = cells
                .iter()
                .map(|&(r, c)| ((r - min_row) as u16, (c - min_col) as u16))
                .collect();
            Piece {
                id,
                value: id as Value,
                lead: shape[0],
                shape,
                row: min_row as i32,
                col: min_col as i32,
            }
        })
        .collect()
}
