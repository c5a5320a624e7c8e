use crate::algorithms::common::{AlgorithmKind, PathfindingAlgorithm, SearchResult};
use crate::algorithms::frontier::{search, PriorityFrontier};
use crate::error::Result;
use crate::grid::{Grid, Position};

/// A* with the Manhattan heuristic.
///
/// Ties on `f = g + h` go to the lower `g`, then to the entry enqueued first.
#[derive(Default)]
pub struct AStar;

impl AStar {
    /// Creates a new instance of the A* algorithm provider.
    pub fn new() -> Self {
        AStar
    }
}

impl PathfindingAlgorithm for AStar {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::AStar
    }

    /// Finds a shortest path from start to goal.
    ///
    /// # Arguments
    ///
    /// * `grid` - The maze grid.
    /// * `start` - The starting position.
    /// * `goal` - The goal position.
    ///
    /// # Returns
    ///
    /// The path (empty if the goal is unreachable) and the number of expanded cells.
    fn find_path(&self, grid: &Grid, start: Position, goal: Position) -> Result<SearchResult> {
        search(grid, start, goal, PriorityFrontier::new(goal))
    }
}

pub fn a_star(grid: &Grid, start: Position, goal: Position) -> Result<SearchResult> {
    AStar::new().find_path(grid, start, goal)
}
