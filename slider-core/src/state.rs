//! Search states: board snapshot plus path bookkeeping.
//!
//! States live in an arena owned by the search driver and refer to each
//! other through [`StateId`] indices. The move-chain is the authoritative
//! path of a state; the board is always the root board replayed through it.

use xxhash_rust::xxh64::Xxh64;

use crate::board::Board;
use crate::moves::{collapsed_length, trailing_run, Move};
use crate::target::Target;
use crate::values::PieceValues;

/// Index of a state in the search arena.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct StateId(pub u32);

impl StateId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An alternate, equally long path that reached a still-queued state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Equivalency {
    /// The alternate state, stored in the arena but not in the visited index.
    pub state: StateId,
    /// Move-chain of the alternate.
    pub chain: Vec<Move>,
    /// Last move of the alternate path.
    pub mov: Move,
}

#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    depth: u32,
    parent: Option<StateId>,
    incoming: Option<Move>,
    chain: Vec<Move>,
    collapsed: u32,
    waiting: bool,
    objective: bool,
    equivalencies: Vec<Equivalency>,
}

impl GameState {
    /// The start state: empty chain, depth 0.
    pub fn root(board: Board) -> GameState {
        GameState {
            board,
            depth: 0,
            parent: None,
            incoming: None,
            chain: Vec::new(),
            collapsed: 0,
            waiting: false,
            objective: false,
            equivalencies: Vec::new(),
        }
    }

    /// State reached from `parent` (stored at `parent_id`) by `mov`, whose
    /// resulting board is `board`.
    pub fn child(parent_id: StateId, parent: &GameState, mov: Move, board: Board) -> GameState {
        let chain = parent.chain_with(mov);
        GameState {
            board,
            depth: parent.depth + 1,
            parent: Some(parent_id),
            incoming: Some(mov),
            collapsed: collapsed_length(&chain),
            chain,
            waiting: false,
            objective: false,
            equivalencies: Vec::new(),
        }
    }

    /// Copy of the board and path, without flags or equivalency records.
    pub fn detached(&self) -> GameState {
        GameState {
            board: self.board.clone(),
            depth: self.depth,
            parent: self.parent,
            incoming: self.incoming,
            chain: self.chain.clone(),
            collapsed: self.collapsed,
            waiting: false,
            objective: false,
            equivalencies: Vec::new(),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Moves from the root along the current path.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn parent(&self) -> Option<StateId> {
        self.parent
    }

    #[inline]
    pub fn incoming(&self) -> Option<Move> {
        self.incoming
    }

    #[inline]
    pub fn chain(&self) -> &[Move] {
        &self.chain
    }

    /// Number of same-piece runs in the chain: the move metric.
    #[inline]
    pub fn collapsed_len(&self) -> u32 {
        self.collapsed
    }

    /// Number of unit translations in the chain.
    #[inline]
    pub fn real_len(&self) -> u32 {
        self.chain.len() as u32
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.chain.last().copied()
    }

    /// Trailing moves made by the piece that moved last, oldest first.
    #[inline]
    pub fn trajectory(&self) -> &[Move] {
        trailing_run(&self.chain)
    }

    /// This state's chain extended by `mov`.
    pub fn chain_with(&self, mov: Move) -> Vec<Move> {
        let mut chain = Vec::with_capacity(self.chain.len() + 1);
        chain.extend_from_slice(&self.chain);
        chain.push(mov);
        chain
    }

    /// Replace the move-chain and recompute its collapsed length.
    pub fn set_chain(&mut self, chain: Vec<Move>) {
        self.collapsed = collapsed_length(&chain);
        self.chain = chain;
    }

    /// Rewrite the path of this state: new chain, the board that chain
    /// produces, and the ancestor it continues from.
    pub fn reroute(&mut self, chain: Vec<Move>, board: Board, parent: StateId, depth: u32) {
        self.incoming = chain.last().copied();
        self.set_chain(chain);
        self.board = board;
        self.parent = Some(parent);
        self.depth = depth;
    }

    /// Take over the path of `other`, an equal state reached more cheaply.
    /// Identity flags and equivalency records stay with `self`.
    pub fn adopt_path(&mut self, other: &GameState) {
        self.board.clone_from(&other.board);
        self.depth = other.depth;
        self.parent = other.parent;
        self.incoming = other.incoming;
        self.chain.clone_from(&other.chain);
        self.collapsed = other.collapsed;
    }

    /// Canonical equality: cell-wise comparison values match.
    #[inline]
    pub fn equal(&self, other: &GameState, values: &PieceValues) -> bool {
        boards_equal(&self.board, &other.board, values)
    }

    /// Whether this state satisfies the objective pattern.
    #[inline]
    pub fn equal_sub(&self, target: &Target, values: &PieceValues) -> bool {
        target.matches(&self.board, values)
    }

    #[inline]
    pub fn canonical_hash(&self, values: &PieceValues) -> u64 {
        canonical_hash(&self.board, values)
    }

    /// Queued and not yet expanded.
    #[inline]
    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    #[inline]
    pub fn set_waiting(&mut self, waiting: bool) {
        self.waiting = waiting;
    }

    #[inline]
    pub fn is_objective(&self) -> bool {
        self.objective
    }

    #[inline]
    pub fn mark_objective(&mut self) {
        self.objective = true;
    }

    #[inline]
    pub fn equivalencies(&self) -> &[Equivalency] {
        &self.equivalencies
    }

    pub fn add_equivalency(&mut self, record: Equivalency) {
        self.equivalencies.push(record);
    }
}

/// Cell-wise equality of comparison values. Boards with alike pieces
/// swapped are equal.
pub fn boards_equal(a: &Board, b: &Board, values: &PieceValues) -> bool {
    a.rows() == b.rows()
        && a.cols() == b.cols()
        && a
            .cells()
            .iter()
            .zip(b.cells())
            .all(|(&x, &y)| x == y || values.value(x) == values.value(y))
}

/// xxh64 over the row-major comparison values. Consistent with
/// [`boards_equal`]; collisions are resolved by comparing boards.
pub fn canonical_hash(board: &Board, values: &PieceValues) -> u64 {
    let mut hasher = Xxh64::new(0);
    for &id in board.cells() {
        hasher.update(&values.value(id).to_le_bytes());
    }
    hasher.digest()
}
