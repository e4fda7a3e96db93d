//! Search statistics tracking.

use std::time::Instant;

use serde::Serialize;
use tracing::info;

/// Get current process memory usage in bytes (RSS - Resident Set Size).
/// Returns None if unable to determine.
#[cfg(target_os = "linux")]
pub fn get_memory_usage() -> Option<u64> {
    use std::fs;

    let status = fs::read_to_string("/proc/self/status").ok()?;
    for line in status.lines() {
        if let Some(rest) = line.strip_prefix("VmRSS:") {
            let kb: u64 = rest.split_whitespace().next()?.parse().ok()?;
            return Some(kb * 1024);
        }
    }
    None
}

#[cfg(not(target_os = "linux"))]
pub fn get_memory_usage() -> Option<u64> {
    None
}

/// Format bytes as human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Statistics collected during a search.
#[derive(Debug, Default, Clone, Serialize)]
pub struct FinderStats {
    /// Canonical states discovered (visited index size)
    pub states: u64,

    /// States dequeued and expanded
    pub expanded: u64,

    /// Candidate moves generated over all expansions
    pub candidate_moves: u64,
    pub min_degree: Option<u64>,
    pub max_degree: u64,

    /// Frontier size range, sampled after each expansion
    pub min_frontier: Option<usize>,
    pub max_frontier: usize,

    /// Enqueued states per depth
    pub depth_histogram: Vec<u64>,

    /// Known states reached again by a shorter path
    pub improvements: u64,

    /// Equal-length alternates recorded on waiting states
    pub equivalencies_added: u64,
    /// Children rerouted through an alternate
    pub equivalencies_applied: u64,

    /// Improved states pushed back on the frontier
    pub requeues: u64,

    /// For rate calculation
    #[serde(skip)]
    start_time: Option<Instant>,
    #[serde(skip)]
    last_log_time: Option<Instant>,
    #[serde(skip)]
    last_log_expanded: u64,
}

impl FinderStats {
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_log_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// Record one expansion and the frontier size after it.
    pub fn record_expansion(&mut self, degree: usize, frontier: usize) {
        let degree = degree as u64;
        self.expanded += 1;
        self.candidate_moves += degree;
        self.min_degree = Some(self.min_degree.map_or(degree, |d| d.min(degree)));
        self.max_degree = self.max_degree.max(degree);
        self.min_frontier = Some(self.min_frontier.map_or(frontier, |f| f.min(frontier)));
        self.max_frontier = self.max_frontier.max(frontier);
    }

    /// Record a state entering the frontier at `depth`.
    pub fn record_enqueue(&mut self, depth: u32) {
        let depth = depth as usize;
        if self.depth_histogram.len() <= depth {
            self.depth_histogram.resize(depth + 1, 0);
        }
        self.depth_histogram[depth] += 1;
    }

    /// Average number of candidate moves per expansion.
    pub fn node_degree(&self) -> f64 {
        if self.expanded == 0 {
            0.0
        } else {
            self.candidate_moves as f64 / self.expanded as f64
        }
    }

    /// Get current expansions per second
    pub fn expanded_per_sec(&self) -> f64 {
        if let Some(start) = self.start_time {
            let elapsed = start.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                return self.expanded as f64 / elapsed;
            }
        }
        0.0
    }

    /// Check if we should log progress
    pub fn should_log(&self, interval_secs: u64) -> bool {
        if let Some(last) = self.last_log_time {
            last.elapsed().as_secs() >= interval_secs
        } else {
            true
        }
    }

    /// Log progress and reset log timer
    pub fn log_progress(&mut self, frontier: usize, depth: u32, best: Option<u32>) {
        let now = Instant::now();
        let elapsed_total = self.start_time.map(|s| s.elapsed().as_secs()).unwrap_or(0);

        // Calculate rate since last log
        let rate = if let Some(last) = self.last_log_time {
            let elapsed = last.elapsed().as_secs_f64();
            let expanded = self.expanded - self.last_log_expanded;
            if elapsed > 0.0 {
                expanded as f64 / elapsed
            } else {
                0.0
            }
        } else {
            self.expanded_per_sec()
        };

        let mem_str = get_memory_usage()
            .map(|m| format!(" mem={}", format_bytes(m)))
            .unwrap_or_default();
        let best_str = best.map(|b| format!(" best={b}")).unwrap_or_default();

        info!(
            "[{:02}:{:02}:{:02}] expanded={} states={} frontier={} depth={} rate={:.0}/s{}{}",
            elapsed_total / 3600,
            (elapsed_total % 3600) / 60,
            elapsed_total % 60,
            self.expanded,
            self.states,
            frontier,
            depth,
            rate,
            best_str,
            mem_str,
        );

        self.last_log_time = Some(now);
        self.last_log_expanded = self.expanded;
    }

    /// Print final summary
    pub fn print_summary(&self) {
        println!("States discovered: {}", self.states);
        println!("States expanded: {}", self.expanded);
        println!(
            "Node degree: avg {:.2} (min {}, max {})",
            self.node_degree(),
            self.min_degree.unwrap_or(0),
            self.max_degree
        );
        println!(
            "Frontier size: {}..{}",
            self.min_frontier.unwrap_or(0),
            self.max_frontier
        );
        println!("Path improvements: {}", self.improvements);
        println!(
            "Equivalencies: {} added, {} applied",
            self.equivalencies_added, self.equivalencies_applied
        );
        println!("Re-enqueued: {}", self.requeues);
        if let Some(mem) = get_memory_usage() {
            println!("Memory: {}", format_bytes(mem));
        }

        if let Some(start) = self.start_time {
            let elapsed = start.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                println!(
                    "Average rate: {:.0} states/sec",
                    self.expanded as f64 / elapsed
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn test_degree_and_frontier_ranges() {
        let mut stats = FinderStats::new();
        assert_eq!(stats.node_degree(), 0.0);
        stats.record_expansion(4, 10);
        stats.record_expansion(2, 3);
        assert_eq!(stats.expanded, 2);
        assert_eq!(stats.node_degree(), 3.0);
        assert_eq!(stats.min_degree, Some(2));
        assert_eq!(stats.max_degree, 4);
        assert_eq!(stats.min_frontier, Some(3));
        assert_eq!(stats.max_frontier, 10);
    }

    #[test]
    fn test_depth_histogram_grows() {
        let mut stats = FinderStats::new();
        stats.record_enqueue(0);
        stats.record_enqueue(3);
        stats.record_enqueue(3);
        assert_eq!(stats.depth_histogram, vec![1, 0, 0, 2]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_memory_usage_available() {
        assert!(get_memory_usage().unwrap_or(0) > 0);
    }
}
