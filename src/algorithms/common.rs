use crate::algorithms::a_star::AStar;
use crate::algorithms::bfs::Bfs;
use crate::algorithms::dfs::Dfs;
use crate::error::Result;
use crate::grid::{Grid, Position};
use clap::ValueEnum;
use std::fmt;

/// Outcome of one search: the path found and how many cells were expanded.
///
/// An empty path means the goal is unreachable; `visited` still counts every
/// cell expanded before the frontier ran dry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub path: Vec<Position>,
    pub visited: usize,
}

impl SearchResult {
    pub fn not_found(visited: usize) -> Self {
        SearchResult {
            path: Vec::new(),
            visited,
        }
    }

    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Path length in nodes, start and end included. Zero when unreachable.
    pub fn path_length(&self) -> usize {
        self.path.len()
    }

    /// Number of moves along the path, `None` when unreachable.
    pub fn edge_count(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }
}

pub trait PathfindingAlgorithm {
    fn kind(&self) -> AlgorithmKind;

    /// Searches from `start` to `goal` without modifying the grid.
    fn find_path(&self, grid: &Grid, start: Position, goal: Position) -> Result<SearchResult>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum AlgorithmKind {
    Bfs,
    Dfs,
    AStar,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 3] =
        [AlgorithmKind::Bfs, AlgorithmKind::Dfs, AlgorithmKind::AStar];

    /// Name used in tables and in the CSV `Algorithm` column.
    pub fn name(&self) -> &'static str {
        match self {
            AlgorithmKind::Bfs => "BFS",
            AlgorithmKind::Dfs => "DFS",
            AlgorithmKind::AStar => "A*",
        }
    }

    pub fn algorithm(&self) -> Box<dyn PathfindingAlgorithm> {
        match self {
            AlgorithmKind::Bfs => Box::new(Bfs::new()),
            AlgorithmKind::Dfs => Box::new(Dfs::new()),
            AlgorithmKind::AStar => Box::new(AStar::new()),
        }
    }

    /// Whether the strategy always returns a shortest path.
    pub fn is_optimal(&self) -> bool {
        !matches!(self, AlgorithmKind::Dfs)
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Manhattan distance, admissible and consistent on a 4-connected grid.
pub fn heuristic(from: Position, to: Position) -> usize {
    from.manhattan(&to)
}

/// Rejects searches whose endpoints fall outside the grid.
pub fn validate_endpoints(grid: &Grid, start: Position, goal: Position) -> Result<()> {
    grid.check_bounds(start)?;
    grid.check_bounds(goal)
}
