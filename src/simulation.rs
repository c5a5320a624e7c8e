use crate::algorithms::common::AlgorithmKind;
use crate::config::Config;
use crate::error::Result;
use crate::grid::{Grid, Position};
use crate::maze::{Maze, MazeGenerator};
use crate::statistics::Statistics;
use log::{debug, info};
use pathfinding::prelude::astar;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct AlgorithmResult {
    pub statistics: Statistics,
    pub path: Vec<Position>,
}

impl AlgorithmResult {
    pub fn name(&self) -> &'static str {
        self.statistics.algorithm.name()
    }
}

/// Generates one maze and solves it with every selected algorithm.
pub struct Simulation {
    config: Config,
    maze: Maze,
    optimal_path_length: usize,
}

impl Simulation {
    pub fn new(config: Config) -> Result<Self> {
        let mut generator = MazeGenerator::new(config.seed);
        let maze = generator.generate(config.rows, config.cols, config.complexity)?;
        Ok(Self::with_maze(config, maze))
    }

    /// Create simulation around an existing maze
    pub fn with_maze(config: Config, maze: Maze) -> Self {
        let optimal_path_length =
            Self::calculate_optimal_path_with_astar(&maze.grid, maze.start, maze.end);
        Simulation {
            config,
            maze,
            optimal_path_length,
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn optimal_path_length(&self) -> usize {
        self.optimal_path_length
    }

    pub fn run(&self) -> Result<Vec<AlgorithmResult>> {
        let maze = &self.maze;
        info!(
            "Maze size: {}x{}, complexity: {}, start: {}, end: {}",
            maze.rows(),
            maze.cols(),
            maze.complexity,
            maze.start,
            maze.end
        );
        debug!(
            "Start walkable: {}, end walkable: {}",
            maze.grid.is_traversable(maze.start),
            maze.grid.is_traversable(maze.end)
        );

        if !self.config.no_visualization {
            maze.grid.print_grid(None);
        }

        let mut results = Vec::new();
        for kind in self.config.algorithm.kinds() {
            let result = self.run_algorithm(kind)?;

            if result.path.is_empty() {
                println!("{} could not find a path.", kind);
            } else if !self.config.no_visualization {
                println!("=== {} ({:.6}s) ===", kind, result.statistics.elapsed.as_secs_f64());
                maze.grid.print_grid(Some(result.path.as_slice()));
            }

            results.push(result);
        }

        Ok(results)
    }

    fn run_algorithm(&self, kind: AlgorithmKind) -> Result<AlgorithmResult> {
        let algorithm = kind.algorithm();

        let find_path_start = Instant::now();
        let result = algorithm.find_path(&self.maze.grid, self.maze.start, self.maze.end)?;
        let elapsed = find_path_start.elapsed();

        debug!(
            "{}: path length {}, visited {}, {:.2?}",
            kind,
            result.path_length(),
            result.visited,
            elapsed
        );

        let statistics = Statistics::new(kind, &result, elapsed, self.optimal_path_length);
        Ok(AlgorithmResult {
            statistics,
            path: result.path,
        })
    }

    /// Print comparison results in a table
    pub fn print_comparison_results(results: &[AlgorithmResult]) {
        println!("\n=== ALGORITHM COMPARISON RESULTS ===");
        println!();

        println!(
            "{:<10} {:<8} {:<12} {:<14} {:<12} {:<12}",
            "Algorithm", "Success", "Path Length", "Visited Nodes", "Efficiency", "Time (s)"
        );
        println!("{}", "-".repeat(72));

        for result in results {
            let stats = &result.statistics;
            let success_str = if stats.success() { "yes" } else { "no" };
            println!(
                "{:<10} {:<8} {:<12} {:<14} {:<12} {:<12}",
                result.name(),
                success_str,
                stats.path_length,
                stats.visited_nodes,
                format!("{:.3}", stats.route_efficiency),
                format!("{:.6}", stats.elapsed.as_secs_f64())
            );
        }
        println!();

        let successful: Vec<_> = results.iter().filter(|r| r.statistics.success()).collect();
        if successful.is_empty() {
            println!("No algorithm found a path between start and end.");
            return;
        }

        println!("=== PERFORMANCE ANALYSIS ===");
        if let Some(shortest) = successful.iter().min_by_key(|r| r.statistics.path_length) {
            println!(
                "Shortest path: {} ({} nodes)",
                shortest.name(),
                shortest.statistics.path_length
            );
        }
        if let Some(leanest) = successful.iter().min_by_key(|r| r.statistics.visited_nodes) {
            println!(
                "Fewest visited nodes: {} ({})",
                leanest.name(),
                leanest.statistics.visited_nodes
            );
        }
        if let Some(fastest) = successful.iter().min_by_key(|r| r.statistics.elapsed) {
            println!(
                "Fastest: {} ({:.2?})",
                fastest.name(),
                fastest.statistics.elapsed
            );
        }
    }

    /// Writes the plain-text summary report for this maze.
    pub fn write_report(&self, path: impl AsRef<Path>, results: &[AlgorithmResult]) -> Result<()> {
        let mut file = File::create(path.as_ref())?;
        file.write_all(self.render_report(results).as_bytes())?;
        info!("Report saved to '{}'", path.as_ref().display());
        Ok(())
    }

    pub fn render_report(&self, results: &[AlgorithmResult]) -> String {
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let maze = &self.maze;

        let mut report = String::new();
        report.push_str("--- Pathfinding Summary Report ---\n\n");
        report.push_str(&format!("Date & Time: {}\n", now));
        report.push_str(
            "Maze Generation Algorithm: Randomized depth-first backbone with braiding\n",
        );
        report.push_str(&format!("Maze Size: {} x {}\n", maze.rows(), maze.cols()));
        report.push_str(&format!("Complexity: {}\n", maze.complexity));
        report.push_str(&format!("Start Point: {}\n", maze.start));
        report.push_str(&format!("End Point: {}\n", maze.end));
        report.push_str(&format!("Optimal Path (moves): {}\n\n", self.optimal_path_length));

        report.push_str("Algorithm   | Time (sec) | Path Length | Visited Nodes\n");
        report.push_str("------------|------------|-------------|--------------\n");
        for result in results {
            let stats = &result.statistics;
            report.push_str(&format!(
                "{:<11} | {:<10.6} | {:<11} | {}\n",
                result.name(),
                stats.elapsed.as_secs_f64(),
                stats.path_length,
                stats.visited_nodes
            ));
        }

        report.push_str("\nNotes:\n");
        report.push_str("- BFS guarantees shortest path but explores many nodes\n");
        report.push_str("- DFS is fast but path length varies\n");
        report.push_str("- A* balances speed and path quality\n");
        report
    }

    /// Shortest path length in moves, or 0 when the end is unreachable.
    ///
    /// Uses the `pathfinding` crate as an independent reference.
    pub fn calculate_optimal_path_with_astar(grid: &Grid, start: Position, end: Position) -> usize {
        astar(
            &start,
            |p| grid.get_neighbors(p).map(|next| (next, 1usize)).collect::<Vec<_>>(),
            |p| p.manhattan(&end),
            |p| *p == end,
        )
        .map_or(0, |(_, cost)| cost)
    }
}
