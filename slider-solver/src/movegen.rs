//! Lazy move generator for breadth-first expansion.
//!
//! Moves are produced one at a time against the puzzle's working board,
//! which must hold the board of the state being expanded.

use slider_core::{Direction, GameState, Move, Puzzle};

/// Lazy move generator that produces moves on demand.
///
/// Generates moves in order:
/// 1. The continued piece (the one that moved last), skipping the inverse of
///    its last move and any step that would touch its own trajectory
/// 2. Every other piece, in extraction order
pub struct MoveGenerator {
    /// Current phase of generation
    phase: MoveGenPhase,
    /// Last move of the expanded state
    last: Option<Move>,
    /// Slot of the piece that moved last
    continued: Option<usize>,
    /// Trailing same-piece run of the state's chain, oldest first
    trajectory: Vec<Move>,
    /// Current piece slot for the other-pieces phase
    slot_idx: usize,
    /// Next direction to try for the current piece
    dir_idx: usize,
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum MoveGenPhase {
    ContinuedPiece,
    OtherPieces,
    Done,
}

impl MoveGenerator {
    /// Create a generator for `state`, whose board must be loaded in `puzzle`.
    pub fn new(puzzle: &Puzzle, state: &GameState) -> Self {
        let last = state.last_move();
        let continued = last.and_then(|m| puzzle.slot(m.piece));

        Self {
            phase: if continued.is_some() {
                MoveGenPhase::ContinuedPiece
            } else {
                MoveGenPhase::OtherPieces
            },
            last,
            continued,
            trajectory: state.trajectory().to_vec(),
            slot_idx: 0,
            dir_idx: 0,
        }
    }

    /// Get the next candidate move, or None if exhausted.
    pub fn next(&mut self, puzzle: &Puzzle) -> Option<Move> {
        loop {
            match self.phase {
                MoveGenPhase::ContinuedPiece => {
                    if let Some(mov) = self.next_continued_move(puzzle) {
                        return Some(mov);
                    }
                    self.phase = MoveGenPhase::OtherPieces;
                    self.dir_idx = 0;
                }
                MoveGenPhase::OtherPieces => {
                    if let Some(mov) = self.next_other_move(puzzle) {
                        return Some(mov);
                    }
                    self.phase = MoveGenPhase::Done;
                    return None;
                }
                MoveGenPhase::Done => return None,
            }
        }
    }

    /// Drain the generator.
    pub fn collect_all(mut self, puzzle: &Puzzle) -> Vec<Move> {
        let mut moves = Vec::new();
        while let Some(mov) = self.next(puzzle) {
            moves.push(mov);
        }
        moves
    }

    fn next_continued_move(&mut self, puzzle: &Puzzle) -> Option<Move> {
        let (Some(slot), Some(last)) = (self.continued, self.last) else {
            return None;
        };

        while self.dir_idx < Direction::ALL.len() {
            let dir = Direction::ALL[self.dir_idx];
            self.dir_idx += 1;

            if !puzzle.can_move(slot, dir) {
                continue;
            }
            let mov = Move::new(last.piece, dir);
            if mov.is_inverse(&last) || trajectory_touches(&self.trajectory, mov) {
                continue;
            }
            return Some(mov);
        }
        None
    }

    fn next_other_move(&mut self, puzzle: &Puzzle) -> Option<Move> {
        let pieces = puzzle.pieces();
        while self.slot_idx < pieces.len() {
            let slot = self.slot_idx;
            if Some(slot) == self.continued {
                self.slot_idx += 1;
                continue;
            }

            while self.dir_idx < Direction::ALL.len() {
                let dir = Direction::ALL[self.dir_idx];
                self.dir_idx += 1;
                if puzzle.can_move(slot, dir) {
                    return Some(Move::new(pieces[slot].id(), dir));
                }
            }

            // Done with this piece
            self.slot_idx += 1;
            self.dir_idx = 0;
        }
        None
    }
}

/// Whether continuing a piece along `trajectory` (oldest first) with
/// `candidate` would bring it orthogonally next to a cell it already left.
///
/// Walks the trajectory backwards from the newest move, accumulating the
/// offset between the candidate's destination and each earlier position.
/// Trajectories shorter than two moves never touch.
pub fn trajectory_touches(trajectory: &[Move], candidate: Move) -> bool {
    if trajectory.len() < 2 {
        return false;
    }

    let mut d_row = candidate.d_row as i32;
    let mut d_col = candidate.d_col as i32;
    for prior in trajectory.iter().rev() {
        d_row += prior.d_row as i32;
        d_col += prior.d_col as i32;
        if d_row * d_row + d_col * d_col == 1 {
            return true;
        }
    }
    false
}
