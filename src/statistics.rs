use crate::algorithms::common::{AlgorithmKind, SearchResult};
use std::fmt;
use std::time::Duration;

/// Measurements for one (maze, algorithm) run.
#[derive(Debug, Clone)]
pub struct Statistics {
    pub algorithm: AlgorithmKind,
    /// Path length in nodes; zero when no path was found.
    pub path_length: usize,
    pub visited_nodes: usize,
    pub elapsed: Duration,
    /// Shortest path length in moves, from the reference search.
    pub optimal_path_length: usize,
    pub route_efficiency: f64,
}

impl Statistics {
    pub fn new(
        algorithm: AlgorithmKind,
        result: &SearchResult,
        elapsed: Duration,
        optimal_path_length: usize,
    ) -> Self {
        let mut stats = Statistics {
            algorithm,
            path_length: result.path_length(),
            visited_nodes: result.visited,
            elapsed,
            optimal_path_length,
            route_efficiency: 0.0,
        };
        stats.calculate_efficiency();
        stats
    }

    pub fn success(&self) -> bool {
        self.path_length > 0
    }

    /// Moves taken relative to the optimal number of moves; 1.0 is optimal.
    pub fn calculate_efficiency(&mut self) {
        let moves = self.path_length.saturating_sub(1);
        if moves > 0 && self.optimal_path_length > 0 {
            self.route_efficiency = moves as f64 / self.optimal_path_length as f64;
        } else {
            self.route_efficiency = 0.0;
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Algorithm Statistics:", self.algorithm)?;
        writeln!(f, "Path Length (nodes): {}", self.path_length)?;
        writeln!(f, "Visited Nodes: {}", self.visited_nodes)?;
        writeln!(f, "Elapsed: {:.2?}", self.elapsed)?;
        writeln!(f, "Optimal Path Length (moves): {}", self.optimal_path_length)?;
        if self.success() {
            writeln!(f, "Route Efficiency: {:.3}", self.route_efficiency)?;
        } else {
            writeln!(f, "No path found")?;
        }
        Ok(())
    }
}

/// Wall-clock samples of repeated calls to the same search.
#[derive(Debug, Clone, Default)]
pub struct TimingData {
    pub find_path_times: Vec<Duration>,
}

impl TimingData {
    pub fn new() -> Self {
        TimingData {
            find_path_times: Vec::new(),
        }
    }

    pub fn record(&mut self, elapsed: Duration) {
        self.find_path_times.push(elapsed);
    }

    pub fn average_find_path_time(&self) -> Duration {
        if self.find_path_times.is_empty() {
            Duration::from_nanos(0)
        } else {
            let total: Duration = self.find_path_times.iter().sum();
            let calls = self.find_path_times.len();
            match u32::try_from(calls) {
                Ok(calls) => total / calls,
                Err(_) => total.div_f64(calls as f64),
            }
        }
    }

    pub fn total_calls(&self) -> usize {
        self.find_path_times.len()
    }
}

/// Aggregate over many runs of one algorithm.
#[derive(Debug, Clone, Default)]
pub struct AlgorithmSummary {
    pub runs: usize,
    pub successes: usize,
    total_path_length: usize,
    total_visited: usize,
    total_seconds: f64,
}

impl AlgorithmSummary {
    pub fn add(&mut self, path_length: usize, visited_nodes: usize, seconds: f64) {
        self.runs += 1;
        if path_length > 0 {
            self.successes += 1;
            self.total_path_length += path_length;
        }
        self.total_visited += visited_nodes;
        self.total_seconds += seconds;
    }

    pub fn success_rate(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.successes as f64 / self.runs as f64 * 100.0
        }
    }

    /// Mean path length over successful runs only.
    pub fn average_path_length(&self) -> f64 {
        if self.successes == 0 {
            0.0
        } else {
            self.total_path_length as f64 / self.successes as f64
        }
    }

    pub fn average_visited(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.total_visited as f64 / self.runs as f64
        }
    }

    pub fn average_seconds(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.total_seconds / self.runs as f64
        }
    }
}

impl fmt::Display for AlgorithmSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  Success rate: {}/{} ({:.1}%)",
            self.successes,
            self.runs,
            self.success_rate()
        )?;
        if self.successes > 0 {
            writeln!(f, "  Average path length: {:.1}", self.average_path_length())?;
        }
        writeln!(f, "  Average visited nodes: {:.1}", self.average_visited())?;
        writeln!(f, "  Average time: {:.6}s", self.average_seconds())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;

    fn result(len: usize, visited: usize) -> SearchResult {
        SearchResult {
            path: (0..len).map(|col| Position::new(0, col)).collect(),
            visited,
        }
    }

    #[test]
    fn efficiency_is_moves_over_optimal() {
        let stats =
            Statistics::new(AlgorithmKind::Dfs, &result(9, 20), Duration::from_millis(1), 4);
        assert!(stats.success());
        assert!((stats.route_efficiency - 2.0).abs() < f64::EPSILON);

        let optimal = Statistics::new(AlgorithmKind::Bfs, &result(5, 12), Duration::ZERO, 4);
        assert!((optimal.route_efficiency - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn failed_run_has_zero_efficiency() {
        let stats = Statistics::new(AlgorithmKind::AStar, &result(0, 3), Duration::ZERO, 0);
        assert!(!stats.success());
        assert_eq!(stats.route_efficiency, 0.0);
        assert!(stats.to_string().contains("No path found"));
    }

    #[test]
    fn timing_average() {
        let mut timing = TimingData::new();
        assert_eq!(timing.average_find_path_time(), Duration::ZERO);
        timing.record(Duration::from_micros(10));
        timing.record(Duration::from_micros(30));
        assert_eq!(timing.total_calls(), 2);
        assert_eq!(timing.average_find_path_time(), Duration::from_micros(20));

        timing.record(Duration::from_micros(50));
        assert_eq!(timing.average_find_path_time(), Duration::from_micros(30));
    }

    #[test]
    fn summary_averages() {
        let mut summary = AlgorithmSummary::default();
        summary.add(10, 40, 0.5);
        summary.add(0, 20, 0.1);
        summary.add(6, 30, 0.3);

        assert_eq!(summary.runs, 3);
        assert_eq!(summary.successes, 2);
        assert!((summary.average_path_length() - 8.0).abs() < 1e-9);
        assert!((summary.average_visited() - 30.0).abs() < 1e-9);
        assert!((summary.average_seconds() - 0.3).abs() < 1e-9);
        assert!((summary.success_rate() - 200.0 / 3.0).abs() < 1e-9);
    }
}
