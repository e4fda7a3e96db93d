//! Move-metric solver for sliding-block puzzles.
//!
//! Breadth-first search where sliding one piece any number of cells in a
//! row counts as a single move.

pub mod config;
pub mod finder;
pub mod movegen;
pub mod stats;

pub use config::{puzzle_files, ConfigError, PuzzleFile};
pub use finder::{EndStatus, ExtremalReport, Finder, SearchOptions, SearchReport};
pub use movegen::{trajectory_touches, MoveGenerator};
pub use stats::FinderStats;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install a stderr log subscriber filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
