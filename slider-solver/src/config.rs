//! Puzzle definition files.
//!
//! A puzzle file is a JSON object:
//!
//! ```json
//! {
//!   "name": "Supercompo",
//!   "board": [[0,1,1,0],[9,1,1,10],[2,3,3,6],[2,4,4,6],[7,5,5,8]],
//!   "target": [[0,0,0,0],[0,0,0,0],[0,0,0,0],[0,1,1,0],[0,1,1,0]],
//!   "alike": { "auto": true },
//!   "max_depth": 200,
//!   "max_states": 1999999,
//!   "expected_length": 123
//! }
//! ```
//!
//! Only `name` and `board` are required. Search options sit at the top
//! level and default to unlimited search in hard-optimal mode.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use slider_core::{AlikePieces, Board, BoardError, Puzzle, Target};

use crate::finder::{Finder, SearchOptions};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid puzzle: {0}")]
    Board(#[from] BoardError),
}

/// One puzzle with its objective and search settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PuzzleFile {
    pub name: String,

    /// Initial grid of piece identifiers (0 = empty).
    pub board: Vec<Vec<u32>>,

    /// Objective grid naming piece identifiers; 0 cells are wildcards.
    #[serde(default)]
    pub target: Option<Vec<Vec<u32>>>,

    #[serde(default)]
    pub alike: AlikePieces,

    #[serde(flatten)]
    pub search: SearchOptions,

    /// Known optimal move count, checked by `verify`.
    #[serde(default)]
    pub expected_length: Option<u32>,

    #[serde(default)]
    pub notes: Option<String>,
}

impl PuzzleFile {
    /// Loads a puzzle from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parses a puzzle from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Extract pieces and translate the target.
    pub fn build(&self) -> Result<(Puzzle, Option<Target>), ConfigError> {
        let board = Board::from_rows(&self.board)?;
        let puzzle = Puzzle::new(board, &self.alike)?;
        let target = match &self.target {
            Some(rows) => Some(puzzle.target(&Board::from_rows(rows)?)?),
            None => None,
        };
        Ok((puzzle, target))
    }

    /// A finder ready to search this puzzle with its own options.
    pub fn finder(&self) -> Result<Finder, ConfigError> {
        self.finder_with(self.search)
    }

    /// A finder using `options` instead of the file's.
    pub fn finder_with(&self, options: SearchOptions) -> Result<Finder, ConfigError> {
        let (puzzle, target) = self.build()?;
        Ok(Finder::new(puzzle, target, options))
    }
}

/// Every `*.json` file in `dir`, sorted by path.
pub fn puzzle_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, ConfigError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
