use crate::algorithms::common::{AlgorithmKind, PathfindingAlgorithm, SearchResult};
use crate::algorithms::frontier::{search, FifoFrontier};
use crate::error::Result;
use crate::grid::{Grid, Position};

/// Breadth-first search. Explores in non-decreasing distance order, so the
/// path it returns is a shortest one.
#[derive(Default)]
pub struct Bfs;

impl Bfs {
    pub fn new() -> Self {
        Bfs
    }
}

impl PathfindingAlgorithm for Bfs {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Bfs
    }

    fn find_path(&self, grid: &Grid, start: Position, goal: Position) -> Result<SearchResult> {
        search(grid, start, goal, FifoFrontier::default())
    }
}

pub fn bfs(grid: &Grid, start: Position, goal: Position) -> Result<SearchResult> {
    Bfs::new().find_path(grid, start, goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    #[test]
    fn open_room_prefers_vertical_moves_first() {
        // Up/down are enqueued before left/right, so the first shortest path
        // reaching the goal goes down before it goes right.
        let grid = Grid::filled(3, 3, Cell::Path);
        let result = bfs(&grid, Position::new(0, 0), Position::new(1, 1)).unwrap();
        assert_eq!(
            result.path,
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)]
        );
        // (0,0), (1,0), (0,1) and (2,0) are expanded before (1,1)
        assert_eq!(result.visited, 5);
    }

    #[test]
    fn counts_reachable_cells_when_blocked() {
        let grid = Grid::from_codes(&[
            vec![2, 1, 0, 1],
            vec![1, 1, 0, 3],
        ])
        .unwrap();
        let result = bfs(&grid, Position::new(0, 0), Position::new(1, 3)).unwrap();
        assert!(result.path.is_empty());
        assert_eq!(result.visited, 4);
    }
}
