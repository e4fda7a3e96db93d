//! Sliding-block puzzle solver
//!
//! Solves one puzzle file under the move metric.
//!
//! ```text
//! slider <puzzle.json> [--moves] [--json] [--extremals]
//!        [--no-hard-optimal] [--max-depth N] [--max-states N]
//! ```

use std::env;
use std::process::ExitCode;

use slider_solver::{init_tracing, PuzzleFile, SearchOptions};

#[derive(Debug, Default, PartialEq)]
struct Args {
    path: String,
    moves: bool,
    json: bool,
    extremals: bool,
    no_hard_optimal: bool,
    max_depth: Option<u32>,
    max_states: Option<u64>,
}

const USAGE: &str = "usage: slider <puzzle.json> [--moves] [--json] [--extremals] \
                     [--no-hard-optimal] [--max-depth N] [--max-states N]";

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut path = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--moves" => parsed.moves = true,
            "--json" => parsed.json = true,
            "--extremals" => parsed.extremals = true,
            "--no-hard-optimal" => parsed.no_hard_optimal = true,
            "--max-depth" => {
                let value = iter.next().ok_or("--max-depth needs a value")?;
                parsed.max_depth =
                    Some(value.parse().map_err(|_| format!("bad --max-depth: {value}"))?);
            }
            "--max-states" => {
                let value = iter.next().ok_or("--max-states needs a value")?;
                parsed.max_states =
                    Some(value.parse().map_err(|_| format!("bad --max-states: {value}"))?);
            }
            flag if flag.starts_with("--") => return Err(format!("unknown flag: {flag}")),
            other => {
                if path.replace(other.to_string()).is_some() {
                    return Err(format!("unexpected argument: {other}"));
                }
            }
        }
    }

    parsed.path = path.ok_or_else(|| USAGE.to_string())?;
    Ok(parsed)
}

impl Args {
    /// File options overridden by command-line flags.
    fn options(&self, file: SearchOptions) -> SearchOptions {
        SearchOptions {
            max_depth: self.max_depth.unwrap_or(file.max_depth),
            max_states: self.max_states.unwrap_or(file.max_states),
            hard_optimal: file.hard_optimal && !self.no_hard_optimal,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let raw: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::from(2);
        }
    };

    let file = match PuzzleFile::load(&args.path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Error loading {}: {e}", args.path);
            return ExitCode::FAILURE;
        }
    };
    let mut finder = match file.finder_with(args.options(file.search)) {
        Ok(finder) => finder,
        Err(e) => {
            eprintln!("Error in {}: {e}", args.path);
            return ExitCode::FAILURE;
        }
    };

    if !args.json {
        let options = finder.options();
        println!("Sliding-block puzzle solver");
        println!("===========================");
        println!("Puzzle: {}", file.name);
        println!("{}", finder.puzzle().root());
        println!(
            "Limits: max depth {}, max states {}, hard optimal {}",
            limit(options.max_depth as u64),
            limit(options.max_states),
            options.hard_optimal
        );
        println!();
    }

    if args.extremals {
        let report = finder.find_extremals();
        if args.json {
            return print_json(&report);
        }
        println!("Condition: {}", report.end_status);
        println!("Time: {:.2}s", report.duration.as_secs_f64());
        println!(
            "Extremal states: {} at depth {}",
            report.boards.len(),
            report.depth
        );
        if let Some(board) = report.boards.first() {
            println!("{board}");
        }
        println!();
        finder.stats.print_summary();
        return ExitCode::SUCCESS;
    }

    let report = finder.solve();
    if args.json {
        return print_json(&report);
    }

    println!("Condition: {}", report.end_status);
    println!("Time: {:.2}s", report.duration.as_secs_f64());
    println!();
    finder.stats.print_summary();
    println!();

    match (report.collapsed_len, report.real_len) {
        (Some(length), Some(real)) => {
            println!("Solved in {length} moves ({real} unit steps)");
            if let Some(expected) = file.expected_length {
                if expected != length {
                    println!("Note: expected {expected} moves");
                }
            }
            if args.moves {
                let moves: Vec<String> = report.moves.iter().map(|m| m.to_string()).collect();
                println!("Moves: {}", moves.join(" "));
            }
            if let Some(board) = &report.solution {
                println!("\n{board}");
            }
        }
        _ => println!("No solution found."),
    }
    ExitCode::SUCCESS
}

fn limit(value: u64) -> String {
    if value == 0 {
        "unlimited".to_string()
    } else {
        value.to_string()
    }
}

fn print_json<T: serde::Serialize>(report: &T) -> ExitCode {
    match serde_json::to_string_pretty(report) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error writing report: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_flags() {
        let parsed = parse_args(&args(&[
            "puzzles/pennant.json",
            "--moves",
            "--max-depth",
            "83",
            "--no-hard-optimal",
        ]))
        .unwrap();
        assert_eq!(parsed.path, "puzzles/pennant.json");
        assert!(parsed.moves);
        assert!(!parsed.json);
        assert!(parsed.no_hard_optimal);
        assert_eq!(parsed.max_depth, Some(83));
        assert_eq!(parsed.max_states, None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["a.json", "--max-states"])).is_err());
        assert!(parse_args(&args(&["a.json", "--max-depth", "x"])).is_err());
        assert!(parse_args(&args(&["a.json", "--bogus"])).is_err());
        assert!(parse_args(&args(&["a.json", "b.json"])).is_err());
    }

    #[test]
    fn test_flags_override_file_options() {
        let parsed =
            parse_args(&args(&["a.json", "--max-states", "10", "--no-hard-optimal"])).unwrap();
        let file = SearchOptions {
            max_depth: 200,
            max_states: 5,
            hard_optimal: true,
        };
        assert_eq!(
            parsed.options(file),
            SearchOptions {
                max_depth: 200,
                max_states: 10,
                hard_optimal: false,
            }
        );
    }
}
