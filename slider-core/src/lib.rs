//! Sliding-block puzzle model for move-metric searches.
//!
//! # Board Encoding
//!
//! ```text
//! rows × cols grid, row-major, one PieceId per cell
//!   0      = empty
//!   id > 0 = covered by piece `id`
//!
//! Example (Supercompo, 5×4):
//!   .  1  1  .
//!   9  1  1 10
//!   2  3  3  6
//!   2  4  4  6
//!   7  5  5  8
//! ```
//!
//! # Comparison Values
//!
//! ```text
//! PieceId --(PieceValues)--> Value
//!   0                 -> 0
//!   distinct piece    -> its own id
//!   alike group g     -> max_id + 1 + g
//! ```
//!
//! States compare and hash on values, never on raw identifiers, so swapping
//! two alike pieces yields the same state.
//!
//! # Move Metric
//!
//! A [`Move`] slides one piece by one cell. Solution length is counted as
//! the number of maximal same-piece runs in the move-chain
//! ([`collapsed_length`]): sliding a piece around a corner is one move.

pub mod board;
pub mod error;
pub mod moves;
pub mod piece;
pub mod puzzle;
pub mod state;
pub mod target;
pub mod values;

/// Piece identifier as written in the input grid.
pub type PieceId = u16;

/// Comparison value shared by alike pieces.
pub type Value = u32;

pub use board::Board;
pub use error::{BoardError, Result};
pub use moves::{collapsed_length, trailing_run, Direction, Move};
pub use piece::{extract_pieces, Piece};
pub use puzzle::Puzzle;
pub use state::{boards_equal, canonical_hash, Equivalency, GameState, StateId};
pub use target::Target;
pub use values::{AlikePieces, PieceValues};
