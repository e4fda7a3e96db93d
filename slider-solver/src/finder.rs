//! Breadth-first search under the move metric.
//!
//! Every canonical state keeps the shortest known path (by collapsed
//! length). Duplicates reached by an equally long path are remembered as
//! equivalency records on states still waiting in the frontier, so a later
//! continuation of the same piece can run through the alternate ancestor and
//! save a move.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, info};

use slider_core::{
    boards_equal, collapsed_length, Board, Equivalency, GameState, Move, Puzzle, StateId, Target,
};

use crate::movegen::MoveGenerator;
use crate::stats::FinderStats;

/// Search limits and mode. Zero limits mean unlimited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Stop when a state at this depth is dequeued.
    pub max_depth: u32,
    /// Stop once this many states have been expanded.
    pub max_states: u64,
    /// Re-enqueue already expanded states whose path improved.
    pub hard_optimal: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_depth: 0,
            max_states: 0,
            hard_optimal: true,
        }
    }
}

/// Why the search loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndStatus {
    AllStatesExhausted,
    MaxStatesReached,
    MaxDepthReached,
}

impl fmt::Display for EndStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            EndStatus::AllStatesExhausted => "all states explored",
            EndStatus::MaxStatesReached => "max states reached",
            EndStatus::MaxDepthReached => "max depth reached",
        };
        f.write_str(text)
    }
}

fn serialize_board<S: Serializer>(board: &Option<Board>, s: S) -> Result<S::Ok, S::Error> {
    board.as_ref().map(Board::to_rows).serialize(s)
}

fn serialize_boards<S: Serializer>(boards: &[Board], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(boards.iter().map(Board::to_rows))
}

/// Outcome of [`Finder::solve`].
#[derive(Clone, Debug, Serialize)]
pub struct SearchReport {
    pub found: bool,
    /// Move-metric length of the best solution.
    pub collapsed_len: Option<u32>,
    /// Unit translations in the best solution.
    pub real_len: Option<u32>,
    pub moves: Vec<Move>,
    pub duration: Duration,
    pub end_status: EndStatus,
    /// Canonical states discovered.
    pub states: u64,
    pub expanded: u64,
    /// Board reached by replaying `moves` from the start.
    #[serde(serialize_with = "serialize_board")]
    pub solution: Option<Board>,
}

/// Outcome of [`Finder::find_extremals`].
#[derive(Clone, Debug, Serialize)]
pub struct ExtremalReport {
    /// Depth of the farthest dead-end states.
    pub depth: u32,
    #[serde(serialize_with = "serialize_boards")]
    pub boards: Vec<Board>,
    pub duration: Duration,
    pub end_status: EndStatus,
    pub states: u64,
    pub expanded: u64,
}

/// Breadth-first finder owning the state arena, visited index and frontier
/// of one search.
pub struct Finder {
    puzzle: Puzzle,
    target: Option<Target>,
    options: SearchOptions,
    /// All states; canonical ones are also in `index`, alternates are not.
    states: Vec<GameState>,
    /// Canonical hash -> canonical states with that hash.
    index: HashMap<u64, Vec<StateId>>,
    frontier: VecDeque<StateId>,
    best: Option<StateId>,
    collect_extremals: bool,
    extremals: Vec<StateId>,
    extremal_depth: u32,
    log_interval_secs: u64,
    pub stats: FinderStats,
}

impl Finder {
    pub fn new(puzzle: Puzzle, target: Option<Target>, options: SearchOptions) -> Self {
        Self {
            puzzle,
            target,
            options,
            states: Vec::new(),
            index: HashMap::new(),
            frontier: VecDeque::new(),
            best: None,
            collect_extremals: false,
            extremals: Vec::new(),
            extremal_depth: 0,
            log_interval_secs: 5,
            stats: FinderStats::new(),
        }
    }

    /// Seconds between progress lines.
    pub fn with_log_interval(mut self, secs: u64) -> Self {
        self.log_interval_secs = secs;
        self
    }

    #[inline]
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    #[inline]
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    #[inline]
    pub fn state(&self, id: StateId) -> &GameState {
        &self.states[id.index()]
    }

    /// Best objective state found so far.
    #[inline]
    pub fn best(&self) -> Option<StateId> {
        self.best
    }

    /// Search for the shortest move-metric path to the target.
    pub fn solve(&mut self) -> SearchReport {
        self.collect_extremals = false;
        let start = Instant::now();
        info!(
            pieces = self.puzzle.pieces().len(),
            max_depth = self.options.max_depth,
            max_states = self.options.max_states,
            hard_optimal = self.options.hard_optimal,
            "search started"
        );

        self.reset();
        let end_status = self.explore();
        let duration = start.elapsed();

        let best = self.best.map(|id| &self.states[id.index()]);
        let moves = best.map(|s| s.chain().to_vec()).unwrap_or_default();
        let report = SearchReport {
            found: best.is_some(),
            collapsed_len: best.map(GameState::collapsed_len),
            real_len: best.map(GameState::real_len),
            solution: best.map(|_| self.puzzle.replay(&moves)),
            moves,
            duration,
            end_status,
            states: self.stats.states,
            expanded: self.stats.expanded,
        };

        info!(
            found = report.found,
            length = ?report.collapsed_len,
            states = report.states,
            expanded = report.expanded,
            elapsed = ?duration,
            "search finished: {end_status}"
        );
        report
    }

    /// Explore without stopping at solutions and collect the dead-end states
    /// farthest from the start.
    pub fn find_extremals(&mut self) -> ExtremalReport {
        self.collect_extremals = true;
        let start = Instant::now();
        info!(pieces = self.puzzle.pieces().len(), "extremal search started");

        self.reset();
        let end_status = self.explore();
        self.collect_extremals = false;

        let boards = self
            .extremals
            .iter()
            .map(|id| self.states[id.index()].board().clone())
            .collect();
        let report = ExtremalReport {
            depth: self.extremal_depth,
            boards,
            duration: start.elapsed(),
            end_status,
            states: self.stats.states,
            expanded: self.stats.expanded,
        };
        info!(
            depth = report.depth,
            count = report.boards.len(),
            "extremal search finished: {end_status}"
        );
        report
    }

    /// Moves along parent links from the start to `id`.
    ///
    /// Parent links follow the path each state held when it was last
    /// rerouted, so this can differ from the state's own chain. The walk
    /// stops early if the links loop.
    pub fn path_from_root(&self, id: StateId) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut current = &self.states[id.index()];
        for _ in 0..self.states.len() {
            let Some(parent) = current.parent() else {
                break;
            };
            if let Some(mov) = current.incoming() {
                moves.push(mov);
            }
            current = &self.states[parent.index()];
        }
        moves.reverse();
        moves
    }

    fn reset(&mut self) {
        self.states.clear();
        self.index.clear();
        self.frontier.clear();
        self.best = None;
        self.extremals.clear();
        self.extremal_depth = 0;
        self.stats = FinderStats::new();

        let root = GameState::root(self.puzzle.root().clone());
        let hash = root.canonical_hash(self.puzzle.values());
        let is_objective = self.matches_target(&root);
        let id = self.push_state(root);
        self.index.entry(hash).or_default().push(id);
        self.stats.states = 1;
        self.enqueue(id);
        if is_objective {
            self.update_objective(id);
        }
    }

    /// Main loop: pop, check limits, expand.
    fn explore(&mut self) -> EndStatus {
        while let Some(id) = self.frontier.pop_front() {
            let state = &mut self.states[id.index()];
            state.set_waiting(false);
            let depth = state.depth();

            if self.options.max_states > 0 && self.stats.expanded >= self.options.max_states {
                return EndStatus::MaxStatesReached;
            }
            if self.options.max_depth > 0 && depth >= self.options.max_depth {
                return EndStatus::MaxDepthReached;
            }

            let before = self.frontier.len();
            let degree = self.expand(id);
            self.stats.record_expansion(degree, self.frontier.len());

            if self.collect_extremals && self.frontier.len() == before {
                self.add_extremal(id);
            }

            if self.stats.should_log(self.log_interval_secs) {
                let best = self.best.map(|b| self.states[b.index()].collapsed_len());
                self.stats.log_progress(self.frontier.len(), depth, best);
            }
        }
        EndStatus::AllStatesExhausted
    }

    /// Generate and process every child of `id`. Returns the node degree.
    fn expand(&mut self, id: StateId) -> usize {
        // Later children may improve this very state; keep building from the
        // path it had when dequeued.
        let parent = self.states[id.index()].detached();
        self.puzzle.load(parent.board());
        let moves = MoveGenerator::new(&self.puzzle, &parent).collect_all(&self.puzzle);

        for &mov in &moves {
            self.puzzle.apply(mov);
            let mut child = GameState::child(id, &parent, mov, self.puzzle.board().clone());
            self.puzzle.undo(mov);

            if self.continue_equivalency(id, mov, &mut child) {
                self.stats.equivalencies_applied += 1;
            }
            self.process_child(child);
        }
        moves.len()
    }

    /// Reroute `child` through an alternate ancestor of `parent` when that
    /// continues the same piece and shortens the collapsed length.
    ///
    /// Only the first record that reproduces the child's board is
    /// considered.
    fn continue_equivalency(&self, parent: StateId, mov: Move, child: &mut GameState) -> bool {
        let values = self.puzzle.values();
        for record in self.states[parent.index()].equivalencies() {
            if record.mov.piece != mov.piece || record.mov.is_inverse(&mov) {
                continue;
            }
            let alternate = &self.states[record.state.index()];
            let Some(board) = alternate.board().translated(&mov) else {
                continue;
            };
            if !boards_equal(&board, child.board(), values) {
                continue;
            }

            let mut chain = Vec::with_capacity(record.chain.len() + 1);
            chain.extend_from_slice(&record.chain);
            chain.push(mov);
            let length = collapsed_length(&chain);
            if length >= child.collapsed_len() {
                return false;
            }

            debug!(
                %mov,
                from = child.collapsed_len(),
                to = length,
                "continuing through equivalent ancestor"
            );
            child.reroute(chain, board, record.state, alternate.depth() + 1);
            return true;
        }
        false
    }

    /// Insert a new canonical state, improve a known one, or record an
    /// equal-length alternate.
    fn process_child(&mut self, child: GameState) {
        let values = self.puzzle.values();
        let hash = child.canonical_hash(values);
        let existing = self.index.get(&hash).and_then(|bucket| {
            bucket
                .iter()
                .copied()
                .find(|sid| self.states[sid.index()].equal(&child, values))
        });

        let Some(sid) = existing else {
            let is_objective = self.matches_target(&child);
            let id = self.push_state(child);
            self.index.entry(hash).or_default().push(id);
            self.stats.states += 1;
            self.enqueue(id);
            if is_objective {
                self.update_objective(id);
            }
            return;
        };

        let known = &mut self.states[sid.index()];
        if child.collapsed_len() < known.collapsed_len() {
            debug!(
                state = sid.0,
                from = known.collapsed_len(),
                to = child.collapsed_len(),
                "shorter path to known state"
            );
            known.adopt_path(&child);
            let (objective, waiting) = (known.is_objective(), known.is_waiting());
            self.stats.improvements += 1;

            if objective {
                self.update_objective(sid);
            }
            if self.options.hard_optimal && !waiting {
                debug!(state = sid.0, "re-enqueueing improved state");
                self.stats.requeues += 1;
                self.enqueue(sid);
            }
        } else if child.collapsed_len() == known.collapsed_len() && known.is_waiting() {
            let Some(mov) = child.last_move() else {
                return;
            };
            let chain = child.chain().to_vec();
            let alternate = self.push_state(child);
            self.states[sid.index()].add_equivalency(Equivalency {
                state: alternate,
                chain,
                mov,
            });
            self.stats.equivalencies_added += 1;
        }
    }

    fn matches_target(&self, state: &GameState) -> bool {
        self.target
            .as_ref()
            .is_some_and(|target| state.equal_sub(target, self.puzzle.values()))
    }

    /// Mark `id` as a solution and keep it if strictly shorter than the
    /// current best.
    fn update_objective(&mut self, id: StateId) {
        let state = &mut self.states[id.index()];
        state.mark_objective();
        let length = state.collapsed_len();
        let depth = state.depth();

        let better = match self.best {
            None => true,
            Some(best) => length < self.states[best.index()].collapsed_len(),
        };
        if better {
            info!(length, depth, "new best solution");
            self.best = Some(id);
        }
    }

    fn add_extremal(&mut self, id: StateId) {
        let depth = self.states[id.index()].depth();
        if depth > self.extremal_depth {
            self.extremal_depth = depth;
            self.extremals.clear();
            self.extremals.push(id);
        } else if depth == self.extremal_depth {
            self.extremals.push(id);
        }
    }

    fn push_state(&mut self, state: GameState) -> StateId {
        let index = u32::try_from(self.states.len())
            .unwrap_or_else(|_| panic!("state arena exceeds {} entries", u32::MAX));
        self.states.push(state);
        StateId(index)
    }

    fn enqueue(&mut self, id: StateId) {
        let state = &mut self.states[id.index()];
        state.set_waiting(true);
        self.stats.record_enqueue(state.depth());
        self.frontier.push_back(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slider_core::{AlikePieces, Direction};

    fn finder(board: &[Vec<u32>], target: &[Vec<u32>], options: SearchOptions) -> Finder {
        finder_with(board, target, AlikePieces::none(), options)
    }

    fn finder_with(
        board: &[Vec<u32>],
        target: &[Vec<u32>],
        alike: AlikePieces,
        options: SearchOptions,
    ) -> Finder {
        let puzzle = Puzzle::new(Board::from_rows(board).unwrap(), &alike).unwrap();
        let target = puzzle.target(&Board::from_rows(target).unwrap()).unwrap();
        Finder::new(puzzle, Some(target), options)
    }

    #[test]
    fn test_corner_slide_is_one_move() {
        let mut f = finder(
            &[vec![1, 0], vec![0, 0]],
            &[vec![0, 0], vec![0, 1]],
            SearchOptions::default(),
        );
        let report = f.solve();
        assert!(report.found);
        assert_eq!(report.collapsed_len, Some(1));
        assert_eq!(report.real_len, Some(2));
        assert_eq!(report.end_status, EndStatus::AllStatesExhausted);
        assert_eq!(report.solution.unwrap().get(1, 1), 1);
    }

    #[test]
    fn test_two_pieces_two_moves() {
        let mut f = finder(&[vec![1, 2, 0]], &[vec![0, 1, 0]], SearchOptions::default());
        let report = f.solve();
        assert_eq!(report.collapsed_len, Some(2));
        assert_eq!(
            report.moves,
            vec![
                Move::new(2, Direction::Right),
                Move::new(1, Direction::Right)
            ]
        );
    }

    #[test]
    fn test_exhausted_after_single_state() {
        let mut f = finder(&[vec![1, 0]], &[vec![0, 1]], SearchOptions::default());
        let report = f.solve();
        assert!(report.found);
        assert_eq!(report.collapsed_len, Some(1));
        assert_eq!(report.states, 2);
        assert_eq!(report.expanded, 2);
        assert_eq!(report.end_status, EndStatus::AllStatesExhausted);
    }

    #[test]
    fn test_max_depth_stops_search() {
        let options = SearchOptions {
            max_depth: 1,
            ..SearchOptions::default()
        };
        let mut f = finder(&[vec![1, 2, 0]], &[vec![0, 1, 0]], options);
        let report = f.solve();
        assert!(!report.found);
        assert_eq!(report.collapsed_len, None);
        assert!(report.moves.is_empty());
        assert_eq!(report.end_status, EndStatus::MaxDepthReached);
        assert_eq!(report.expanded, 1);
    }

    #[test]
    fn test_max_states_stops_search() {
        let options = SearchOptions {
            max_states: 1,
            ..SearchOptions::default()
        };
        let mut f = finder(&[vec![1, 2, 0]], &[vec![0, 1, 0]], options);
        let report = f.solve();
        assert_eq!(report.end_status, EndStatus::MaxStatesReached);
        assert_eq!(report.expanded, 1);
    }

    #[test]
    fn test_solved_start_has_zero_length() {
        let mut f = finder_with(
            &[vec![1, 0, 2]],
            &[vec![0, 0, 1]],
            AlikePieces::auto(),
            SearchOptions::default(),
        );
        let report = f.solve();
        assert!(report.found);
        assert_eq!(report.collapsed_len, Some(0));
        assert!(report.moves.is_empty());
    }

    #[test]
    fn test_unreachable_target() {
        // An all-wildcard target never matches.
        let mut f = finder(&[vec![1, 1, 0]], &[vec![0, 0, 0]], SearchOptions::default());
        let report = f.solve();
        assert!(!report.found);
        assert_eq!(report.end_status, EndStatus::AllStatesExhausted);
        assert_eq!(report.states, 2);
    }

    #[test]
    fn test_equivalency_continues_same_piece() {
        let mut f = finder(
            &[vec![1, 0, 0], vec![2, 0, 0]],
            &[vec![0, 0, 1], vec![0, 2, 0]],
            SearchOptions::default(),
        );
        f.reset();
        let one = Move::new(1, Direction::Right);
        let two = Move::new(2, Direction::Right);
        let root = f.states[0].detached();

        // Canonical path: 1 then 2.
        let board_a = root.board().translated(&one).unwrap();
        let a = f.push_state(GameState::child(StateId(0), &root, one, board_a.clone()));
        let board_p = board_a.translated(&two).unwrap();
        let p = GameState::child(a, &f.states[a.index()], two, board_p.clone());
        let p = f.push_state(p);

        // Alternate path to the same board: 2 then 1.
        let board_b = root.board().translated(&two).unwrap();
        let b = f.push_state(GameState::child(StateId(0), &root, two, board_b.clone()));
        let board_alt = board_b.translated(&one).unwrap();
        let alt = GameState::child(b, &f.states[b.index()], one, board_alt);
        let chain = alt.chain().to_vec();
        let alt = f.push_state(alt);
        f.states[p.index()].add_equivalency(Equivalency {
            state: alt,
            chain,
            mov: one,
        });

        let next = board_p.translated(&one).unwrap();
        let mut child = GameState::child(p, &f.states[p.index()], one, next);
        assert_eq!(child.collapsed_len(), 3);
        assert!(f.continue_equivalency(p, one, &mut child));
        assert_eq!(child.collapsed_len(), 2);
        assert_eq!(child.chain(), &[two, one, one]);
        assert_eq!(child.parent(), Some(alt));
        assert_eq!(child.depth(), 3);

        // Piece 2 cannot continue through a record made by piece 1.
        let next = board_p.translated(&two).unwrap();
        let mut other = GameState::child(p, &f.states[p.index()], two, next);
        assert!(!f.continue_equivalency(p, two, &mut other));
        assert_eq!(other.chain(), &[one, two, two]);
    }

    #[test]
    fn test_equivalency_recorded_and_applied_in_search() {
        let mut f = finder(
            &[vec![1, 0, 0], vec![2, 0, 0]],
            &[vec![0, 0, 1], vec![0, 2, 0]],
            SearchOptions::default(),
        );
        let report = f.solve();
        assert_eq!(report.collapsed_len, Some(2));
        assert!(f.stats.equivalencies_added >= 1);
        assert!(f.stats.equivalencies_applied >= 1);
    }

    /// Canonical state reached by 1R 2R 1R (three moves), marked as a
    /// solution with one equivalency record, plus an unprocessed child
    /// reaching the same board by 2R 1R 1R (two moves).
    fn improvable(f: &mut Finder, waiting: bool) -> (StateId, GameState) {
        f.reset();
        f.frontier.clear();
        let one = Move::new(1, Direction::Right);
        let two = Move::new(2, Direction::Right);

        let mut prev = StateId(0);
        for mov in [one, two, one] {
            let parent = &f.states[prev.index()];
            let board = parent.board().translated(&mov).unwrap();
            let state = GameState::child(prev, parent, mov, board);
            prev = f.push_state(state);
        }
        let long = prev;
        let hash = f.states[long.index()].canonical_hash(f.puzzle.values());
        f.index.entry(hash).or_default().push(long);
        f.states[long.index()].add_equivalency(Equivalency {
            state: StateId(1),
            chain: vec![one],
            mov: one,
        });
        f.update_objective(long);
        if waiting {
            f.enqueue(long);
        }

        let mut prev = StateId(0);
        for mov in [two, one] {
            let parent = &f.states[prev.index()];
            let board = parent.board().translated(&mov).unwrap();
            let state = GameState::child(prev, parent, mov, board);
            prev = f.push_state(state);
        }
        let parent = &f.states[prev.index()];
        let board = parent.board().translated(&one).unwrap();
        let child = GameState::child(prev, parent, one, board);
        assert_eq!(f.states[long.index()].collapsed_len(), 3);
        assert_eq!(child.collapsed_len(), 2);
        (long, child)
    }

    fn improvable_finder(hard_optimal: bool) -> Finder {
        let options = SearchOptions {
            hard_optimal,
            ..SearchOptions::default()
        };
        finder(
            &[vec![1, 0, 0], vec![2, 0, 0]],
            &[vec![0, 0, 1], vec![0, 2, 0]],
            options,
        )
    }

    #[test]
    fn test_shorter_duplicate_requeues_expanded_state() {
        let mut f = improvable_finder(true);
        let (long, child) = improvable(&mut f, false);
        let arena = f.states.len();
        let chain = child.chain().to_vec();
        let board = child.board().clone();
        let parent = child.parent();

        f.process_child(child);

        assert_eq!(f.states.len(), arena);
        let known = f.state(long);
        assert_eq!(known.chain(), chain.as_slice());
        assert_eq!(known.collapsed_len(), 2);
        assert_eq!(known.board(), &board);
        assert_eq!(known.parent(), parent);
        assert!(known.is_objective());
        assert_eq!(known.equivalencies().len(), 1);
        assert!(known.is_waiting());
        assert_eq!(f.best(), Some(long));
        assert_eq!(f.stats.improvements, 1);
        assert_eq!(f.stats.requeues, 1);
        assert_eq!(f.frontier, VecDeque::from([long]));
    }

    #[test]
    fn test_shorter_duplicate_of_waiting_state_is_not_queued_twice() {
        let mut f = improvable_finder(true);
        let (long, child) = improvable(&mut f, true);

        f.process_child(child);

        assert_eq!(f.state(long).collapsed_len(), 2);
        assert_eq!(f.stats.improvements, 1);
        assert_eq!(f.stats.requeues, 0);
        assert_eq!(f.frontier, VecDeque::from([long]));
    }

    #[test]
    fn test_shorter_duplicate_without_hard_optimal_is_not_requeued() {
        let mut f = improvable_finder(false);
        let (long, child) = improvable(&mut f, false);

        f.process_child(child);

        let known = f.state(long);
        assert_eq!(known.collapsed_len(), 2);
        assert!(known.is_objective());
        assert!(!known.is_waiting());
        assert_eq!(f.stats.improvements, 1);
        assert_eq!(f.stats.requeues, 0);
        assert!(f.frontier.is_empty());
    }

    #[test]
    fn test_options_and_log_interval() {
        let options = SearchOptions {
            max_depth: 4,
            max_states: 0,
            hard_optimal: false,
        };
        let f = finder(&[vec![1, 0]], &[vec![0, 1]], options).with_log_interval(60);
        assert_eq!(f.options(), &options);
        assert_eq!(f.log_interval_secs, 60);
    }

    #[test]
    fn test_path_from_root_follows_parents() {
        let mut f = finder(&[vec![1, 2, 0]], &[vec![0, 1, 0]], SearchOptions::default());
        f.solve();
        let best = f.best().unwrap();
        assert_eq!(f.path_from_root(best), f.state(best).chain());
        assert!(f.path_from_root(StateId(0)).is_empty());
    }

    #[test]
    fn test_extremals_in_corridor() {
        let puzzle = Puzzle::new(
            Board::from_rows(&[[1, 0, 0]]).unwrap(),
            &AlikePieces::none(),
        )
        .unwrap();
        let mut f = Finder::new(puzzle, None, SearchOptions::default());
        let report = f.find_extremals();
        assert_eq!(report.depth, 2);
        assert_eq!(report.boards.len(), 1);
        assert_eq!(report.boards[0].to_rows(), vec![vec![0, 0, 1]]);
        assert_eq!(report.end_status, EndStatus::AllStatesExhausted);
    }

    #[test]
    fn test_solve_twice_is_repeatable() {
        let mut f = finder(
            &[vec![1, 0, 0], vec![2, 2, 0], vec![0, 3, 0]],
            &[vec![0, 0, 0], vec![0, 0, 0], vec![0, 0, 1]],
            SearchOptions::default(),
        );
        let first = f.solve();
        let second = f.solve();
        assert_eq!(first.collapsed_len, second.collapsed_len);
        assert_eq!(first.moves, second.moves);
        assert_eq!(first.states, second.states);
    }

    #[test]
    fn test_report_serializes_board_rows() {
        let mut f = finder(&[vec![1, 0]], &[vec![0, 1]], SearchOptions::default());
        let json = serde_json::to_value(f.solve()).unwrap();
        assert_eq!(json["solution"], serde_json::json!([[0, 1]]));
        assert_eq!(json["end_status"], "AllStatesExhausted");
        assert_eq!(json["moves"][0]["piece"], 1);
    }

    #[test]
    fn test_options_deserialize_defaults() {
        let options: SearchOptions = serde_json::from_str(r#"{"max_depth": 83}"#).unwrap();
        assert_eq!(options.max_depth, 83);
        assert_eq!(options.max_states, 0);
        assert!(options.hard_optimal);
    }
}
