use crate::algorithms::common::{AlgorithmKind, PathfindingAlgorithm, SearchResult};
use crate::algorithms::frontier::{search, LifoFrontier};
use crate::error::Result;
use crate::grid::{Grid, Position};

/// Depth-first search on an explicit stack.
///
/// Neighbors are pushed up, down, left, right, so the last one (right) is
/// explored first. Paths are not guaranteed to be shortest.
#[derive(Default)]
pub struct Dfs;

impl Dfs {
    pub fn new() -> Self {
        Dfs
    }
}

impl PathfindingAlgorithm for Dfs {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Dfs
    }

    fn find_path(&self, grid: &Grid, start: Position, goal: Position) -> Result<SearchResult> {
        search(grid, start, goal, LifoFrontier::default())
    }
}

pub fn dfs(grid: &Grid, start: Position, goal: Position) -> Result<SearchResult> {
    Dfs::new().find_path(grid, start, goal)
}
