//! Playable puzzle: working board plus the pieces moving on it.

use crate::board::Board;
use crate::error::{BoardError, Result};
use crate::moves::{Direction, Move};
use crate::piece::{extract_pieces, Piece};
use crate::target::Target;
use crate::values::{AlikePieces, PieceValues};
use crate::PieceId;

/// Initial board, extracted pieces and the frozen value table, plus one
/// working board that moves are applied to and undone from.
#[derive(Clone, Debug)]
pub struct Puzzle {
    root: Board,
    board: Board,
    pieces: Vec<Piece>,
    /// Piece id → index into `pieces`.
    slots: Vec<Option<usize>>,
    values: PieceValues,
}

impl Puzzle {
    /// Extract pieces from `board` and freeze their comparison values.
    pub fn new(board: Board, alike: &AlikePieces) -> Result<Puzzle> {
        let mut pieces = extract_pieces(&board);
        if pieces.is_empty() {
            return Err(BoardError::NoPieces);
        }
        alike.assign(&mut pieces, board.max_id())?;

        let mut slots = vec![None; board.max_id() as usize + 1];
        for (slot, piece) in pieces.iter().enumerate() {
            slots[piece.id() as usize] = Some(slot);
        }

        let values = PieceValues::from_pieces(&pieces);
        Ok(Puzzle {
            root: board.clone(),
            board,
            pieces,
            slots,
            values,
        })
    }

    /// The board the puzzle started from.
    #[inline]
    pub fn root(&self) -> &Board {
        &self.root
    }

    /// The working board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    #[inline]
    pub fn values(&self) -> &PieceValues {
        &self.values
    }

    /// Index of piece `id` in `pieces()`.
    #[inline]
    pub fn slot(&self, id: PieceId) -> Option<usize> {
        self.slots.get(id as usize).copied().flatten()
    }

    /// Translate an objective grid of piece ids into required values.
    pub fn target(&self, grid: &Board) -> Result<Target> {
        Target::new(grid, &self.values, self.root.rows(), self.root.cols())
    }

    /// Make `board` the working board and re-anchor every piece on it.
    ///
    /// Panics if the board misses a piece: boards handed to a puzzle always
    /// come from its own root by legal moves.
    pub fn load(&mut self, board: &Board) {
        self.board.clone_from(board);

        let mut placed = vec![false; self.pieces.len()];
        let mut remaining = self.pieces.len();
        'scan: for row in 0..board.rows() {
            for col in 0..board.cols() {
                let id = board.get(row, col);
                if id == 0 {
                    continue;
                }
                let slot = self
                    .slot(id)
                    .unwrap_or_else(|| panic!("cell ({row},{col}) holds unknown piece {id}"));
                if !placed[slot] {
                    placed[slot] = true;
                    self.pieces[slot].place_from_lead(row, col);
                    remaining -= 1;
                    if remaining == 0 {
                        break 'scan;
                    }
                }
            }
        }

        if remaining != 0 {
            let missing: Vec<PieceId> = self
                .pieces
                .iter()
                .zip(&placed)
                .filter(|(_, &p)| !p)
                .map(|(piece, _)| piece.id())
                .collect();
            panic!("board is missing pieces {missing:?}");
        }
    }

    /// Whether the piece in `slot` can take one step in `dir`.
    pub fn can_move(&self, slot: usize, dir: Direction) -> bool {
        let piece = &self.pieces[slot];
        let (d_row, d_col) = dir.delta();
        piece.cells_shifted(d_row, d_col).all(|(r, c)| {
            matches!(self.board.get_signed(r, c), Some(id) if id == 0 || id == piece.id())
        })
    }

    /// Legal single-cell translations of the piece in `slot`, in
    /// `Direction::ALL` order.
    pub fn movements(&self, slot: usize) -> impl Iterator<Item = Move> + '_ {
        let id = self.pieces[slot].id();
        Direction::ALL
            .into_iter()
            .filter(move |&dir| self.can_move(slot, dir))
            .map(move |dir| Move::new(id, dir))
    }

    /// Translate a piece on the working board.
    ///
    /// Panics when the move is illegal; callers only apply moves produced by
    /// `movements` or replay chains recorded by the search.
    pub fn apply(&mut self, mov: Move) {
        let slot = self
            .slot(mov.piece)
            .unwrap_or_else(|| panic!("move {mov} names unknown piece {}", mov.piece));

        // Clear the piece from its cells.
        let piece = &self.pieces[slot];
        let cells: Vec<(i32, i32)> = piece.cells().collect();
        for &(r, c) in &cells {
            match self.board.get_signed(r, c) {
                Some(id) if id == mov.piece => self.board.set(r as usize, c as usize, 0),
                Some(id) => panic!(
                    "move {mov}: cell ({r},{c}) holds {id}, expected piece {}",
                    mov.piece
                ),
                None => panic!("move {mov}: piece cell ({r},{c}) is off the board"),
            }
        }

        // Check and fill the destination.
        for &(r, c) in &cells {
            let (r, c) = (r + mov.d_row as i32, c + mov.d_col as i32);
            match self.board.get_signed(r, c) {
                Some(0) => self.board.set(r as usize, c as usize, mov.piece),
                Some(id) => panic!("move {mov}: destination ({r},{c}) holds {id}, expected empty"),
                None => panic!("move {mov}: destination ({r},{c}) is off the board"),
            }
        }

        self.pieces[slot].translate(mov.d_row, mov.d_col);
    }

    /// Reverse a previously applied move.
    #[inline]
    pub fn undo(&mut self, mov: Move) {
        self.apply(mov.inverse());
    }

    /// Board reached by playing `chain` from the root.
    pub fn replay(&self, chain: &[Move]) -> Board {
        let mut game = self.clone();
        game.load(&self.root);
        for &mov in chain {
            game.apply(mov);
        }
        game.board
    }
}
