//! Piece-value table and alike-piece configuration.
//!
//! Every piece carries a comparison value. Two boards are the same search
//! state when their cells hold the same values, so giving interchangeable
//! pieces one value makes swaps between them invisible to the search.
//!
//! The table is built once, before searching, and is read-only afterwards.

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::piece::Piece;
use crate::{PieceId, Value};

/// Which pieces are interchangeable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlikePieces {
    /// Unify pieces of identical shape. Overrides `groups`.
    pub auto: bool,
    /// Explicit groups of identifiers sharing one value.
    pub groups: Vec<Vec<PieceId>>,
    /// Identifiers that always keep a value of their own.
    pub distinct: Vec<PieceId>,
}

impl AlikePieces {
    /// Every piece distinct.
    pub fn none() -> Self {
        Self::default()
    }

    /// Shape-based detection.
    pub fn auto() -> Self {
        Self {
            auto: true,
            ..Self::default()
        }
    }

    pub fn groups(groups: Vec<Vec<PieceId>>) -> Self {
        Self {
            groups,
            ..Self::default()
        }
    }

    pub fn with_distinct(mut self, ids: impl IntoIterator<Item = PieceId>) -> Self {
        self.distinct.extend(ids);
        self
    }

    /// Assign comparison values to `pieces` in place.
    ///
    /// Fresh values start right above `max_id` so they never collide with a
    /// piece keeping its own identifier.
    pub fn assign(&self, pieces: &mut [Piece], max_id: PieceId) -> Result<()> {
        let known = |id: PieceId| pieces.iter().any(|p| p.id() == id);
        for &id in self.groups.iter().flatten().chain(self.distinct.iter()) {
            if !known(id) {
                return Err(BoardError::UnknownAlikePiece(id));
            }
        }

        let first_fresh = max_id as Value + 1;

        if self.auto {
            // One value per shape class, classes numbered by first appearance.
            let mut classes: Vec<usize> = Vec::new();
            for i in 0..pieces.len() {
                let class = classes
                    .iter()
                    .position(|&rep| pieces[rep].same_shape(&pieces[i]));
                let class = match class {
                    Some(class) => class,
                    None => {
                        classes.push(i);
                        classes.len() - 1
                    }
                };
                pieces[i].set_value(first_fresh + class as Value);
            }
        } else {
            for (g, group) in self.groups.iter().enumerate() {
                for piece in pieces.iter_mut().filter(|p| group.contains(&p.id())) {
                    piece.set_value(first_fresh + g as Value);
                }
            }
        }

        for piece in pieces.iter_mut().filter(|p| self.distinct.contains(&p.id())) {
            let id = piece.id();
            piece.set_value(id as Value);
        }

        Ok(())
    }
}

/// Frozen identifier → comparison value map. Identifier 0 maps to 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PieceValues {
    by_id: Vec<Value>,
}

impl PieceValues {
    pub fn from_pieces(pieces: &[Piece]) -> Self {
        let max_id = pieces.iter().map(|p| p.id()).max().unwrap_or(0);
        let mut by_id = vec![0; max_id as usize + 1];
        for piece in pieces {
            by_id[piece.id() as usize] = piece.value();
        }
        Self { by_id }
    }

    /// Value of `id`; unknown identifiers compare as empty.
    #[inline]
    pub fn value(&self, id: PieceId) -> Value {
        self.by_id.get(id as usize).copied().unwrap_or(0)
    }

    /// Whether `id` belongs to a piece of this puzzle.
    #[inline]
    pub fn knows(&self, id: PieceId) -> bool {
        self.value(id) != 0
    }

    /// Whether two identifiers are interchangeable.
    #[inline]
    pub fn alike(&self, a: PieceId, b: PieceId) -> bool {
        self.value(a) == self.value(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::piece::extract_pieces;

    fn pieces_of(rows: &[Vec<u32>]) -> (Vec<Piece>, PieceId) {
        let board = Board::from_rows(rows).unwrap();
        (extract_pieces(&board), board.max_id())
    }

    fn values(pieces: &[Piece]) -> Vec<(PieceId, Value)> {
        pieces.iter().map(|p| (p.id(), p.value())).collect()
    }

    #[test]
    fn test_no_alike_keeps_ids() {
        let (mut pieces, max) = pieces_of(&[vec![1, 2], vec![3, 0]]);
        AlikePieces::none().assign(&mut pieces, max).unwrap();
        assert_eq!(values(&pieces), vec![(1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_auto_detect_by_shape() {
        // 1 and 4 are 1x2 horizontal, 2 and 3 are 1x1, 5 is 2x1 vertical.
        let (mut pieces, max) = pieces_of(&[vec![1, 1, 2, 5], vec![3, 4, 4, 5]]);
        AlikePieces::auto().assign(&mut pieces, max).unwrap();
        assert_eq!(values(&pieces), vec![(1, 6), (2, 7), (5, 8), (3, 7), (4, 6)]);
    }

    #[test]
    fn test_explicit_groups() {
        let (mut pieces, max) = pieces_of(&[vec![1, 2, 3, 4]]);
        AlikePieces::groups(vec![vec![1, 3], vec![2]])
            .assign(&mut pieces, max)
            .unwrap();
        assert_eq!(values(&pieces), vec![(1, 5), (2, 6), (3, 5), (4, 4)]);
    }

    #[test]
    fn test_distinct_overrides_auto() {
        let (mut pieces, max) = pieces_of(&[vec![1, 2, 3]]);
        AlikePieces::auto()
            .with_distinct([2])
            .assign(&mut pieces, max)
            .unwrap();
        assert_eq!(values(&pieces), vec![(1, 4), (2, 2), (3, 4)]);
    }

    #[test]
    fn test_unknown_alike_piece() {
        let (mut pieces, max) = pieces_of(&[vec![1, 2]]);
        let err = AlikePieces::groups(vec![vec![1, 9]])
            .assign(&mut pieces, max)
            .unwrap_err();
        assert_eq!(err, BoardError::UnknownAlikePiece(9));
    }

    #[test]
    fn test_table_lookup() {
        let (mut pieces, max) = pieces_of(&[vec![1, 0, 2]]);
        AlikePieces::auto().assign(&mut pieces, max).unwrap();
        let table = PieceValues::from_pieces(&pieces);
        assert_eq!(table.value(0), 0);
        assert_eq!(table.value(1), 3);
        assert_eq!(table.value(2), 3);
        assert_eq!(table.value(40), 0);
        assert!(table.alike(1, 2));
        assert!(table.knows(2));
        assert!(!table.knows(7));
    }

    #[test]
    fn test_deserialize_defaults() {
        let alike: AlikePieces = serde_json::from_str(r#"{"auto": true}"#).unwrap();
        assert_eq!(alike, AlikePieces::auto());
    }
}
