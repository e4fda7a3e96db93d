//! Solve every puzzle file in a directory and compare with the recorded
//! optimal length.
//!
//! ```text
//! verify [DIR] [--all] [--only NAME]
//! ```
//!
//! Puzzles without `expected_length` are skipped unless `--all` is given.
//! Mismatches are reported, not fatal.

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use slider_solver::{init_tracing, puzzle_files, PuzzleFile};

/// Progress lines are sparser than in the single-puzzle solver.
const PROGRESS_SECS: u64 = 30;

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let all = args.iter().any(|a| a == "--all");
    let only = args
        .iter()
        .position(|a| a == "--only")
        .and_then(|i| args.get(i + 1))
        .map(|s| s.to_lowercase());
    let dir = args
        .iter()
        .enumerate()
        .find(|&(i, a)| !a.starts_with("--") && (i == 0 || args[i - 1] != "--only"))
        .map(|(_, a)| a.as_str())
        .unwrap_or("puzzles");

    let paths = match puzzle_files(dir) {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("Cannot read {dir}: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "{:<16} {:>8} {:>6} {:>10} {:>10} {:>9}  {}",
        "puzzle", "expected", "found", "states", "expanded", "time", "result"
    );
    println!("{}", "-".repeat(76));

    let start = Instant::now();
    let (mut passed, mut failed, mut errors) = (0, 0, 0);
    for path in paths {
        let file = match PuzzleFile::load(&path) {
            Ok(file) => file,
            Err(e) => {
                println!("{:<16} error: {e}", path.display());
                errors += 1;
                continue;
            }
        };
        if let Some(name) = &only {
            if !file.name.to_lowercase().contains(name.as_str()) {
                continue;
            }
        }
        if file.expected_length.is_none() && !all {
            continue;
        }

        let mut finder = match file.finder() {
            Ok(finder) => finder.with_log_interval(PROGRESS_SECS),
            Err(e) => {
                println!("{:<16} error: {e}", file.name);
                errors += 1;
                continue;
            }
        };
        let report = finder.solve();

        let found = report
            .collapsed_len
            .map_or_else(|| "-".to_string(), |n| n.to_string());
        let expected = file
            .expected_length
            .map_or_else(|| "?".to_string(), |n| n.to_string());
        let result = match (file.expected_length, report.collapsed_len) {
            (Some(e), Some(f)) if e == f => {
                passed += 1;
                "ok".to_string()
            }
            (Some(_), _) => {
                failed += 1;
                format!("MISMATCH ({})", report.end_status)
            }
            (None, _) => report.end_status.to_string(),
        };

        println!(
            "{:<16} {:>8} {:>6} {:>10} {:>10} {:>8.2}s  {}",
            file.name,
            expected,
            found,
            report.states,
            report.expanded,
            report.duration.as_secs_f64(),
            result
        );
    }

    println!("{}", "-".repeat(76));
    println!(
        "{passed} ok, {failed} mismatched, {errors} errors in {:.1}s",
        start.elapsed().as_secs_f64()
    );

    if errors > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
