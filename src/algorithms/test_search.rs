use crate::algorithms::common::{AlgorithmKind, SearchResult};
use crate::error::MazeError;
use crate::grid::{Cell, Grid, Position};
use crate::maze::MazeGenerator;

fn run_all(
    grid: &Grid,
    start: Position,
    goal: Position,
) -> Vec<(AlgorithmKind, SearchResult)> {
    AlgorithmKind::ALL
        .iter()
        .map(|kind| {
            let result = kind.algorithm().find_path(grid, start, goal).unwrap();
            (*kind, result)
        })
        .collect()
}

fn assert_valid_path(grid: &Grid, result: &SearchResult, start: Position, goal: Position) {
    assert_eq!(result.path.first(), Some(&start));
    assert_eq!(result.path.last(), Some(&goal));
    for pair in result.path.windows(2) {
        assert!(
            pair[0].is_adjacent(&pair[1]),
            "{} -> {} is not a single step",
            pair[0],
            pair[1]
        );
    }
    for pos in &result.path {
        assert_ne!(grid.get(*pos), Some(Cell::Wall), "path crosses a wall at {}", pos);
    }
    assert!(result.visited >= result.path.len());
}

/// Reference shortest path length in nodes from the `pathfinding` crate.
fn reference_length(grid: &Grid, start: Position, goal: Position) -> Option<usize> {
    pathfinding::prelude::bfs(
        &start,
        |p| grid.get_neighbors(p).collect::<Vec<_>>(),
        |p| *p == goal,
    )
    .map(|path| path.len())
}

#[test]
fn start_equals_end_returns_single_cell() {
    let grid = Grid::filled(4, 4, Cell::Wall);
    for pos in [Position::new(0, 0), Position::new(2, 3)] {
        for (kind, result) in run_all(&grid, pos, pos) {
            assert_eq!(result.path, vec![pos], "{}", kind);
            assert_eq!(result.visited, 1, "{}", kind);
        }
    }
}

#[test]
fn isolated_start_visits_only_itself() {
    let mut grid = Grid::filled(3, 3, Cell::Wall);
    grid.set(Position::new(0, 0), Cell::Start).unwrap();
    grid.set(Position::new(2, 2), Cell::End).unwrap();

    for (kind, result) in run_all(&grid, Position::new(0, 0), Position::new(2, 2)) {
        assert!(result.path.is_empty(), "{}", kind);
        assert_eq!(result.visited, 1, "{}", kind);
    }
}

#[test]
fn adjacent_endpoints_in_walled_grid() {
    let mut grid = Grid::filled(3, 3, Cell::Wall);
    grid.set(Position::new(1, 1), Cell::Start).unwrap();
    grid.set(Position::new(1, 2), Cell::End).unwrap();

    for (kind, result) in run_all(&grid, Position::new(1, 1), Position::new(1, 2)) {
        assert_eq!(result.path, vec![Position::new(1, 1), Position::new(1, 2)], "{}", kind);
        assert_eq!(result.visited, 2, "{}", kind);
    }
}

#[test]
fn unreachable_goal_reports_reachable_region() {
    let grid = Grid::from_codes(&[
        vec![0, 0, 0, 0, 0, 0],
        vec![0, 2, 1, 0, 1, 0],
        vec![0, 1, 1, 0, 3, 0],
        vec![0, 0, 0, 0, 0, 0],
    ])
    .unwrap();

    for (kind, result) in run_all(&grid, Position::new(1, 1), Position::new(2, 4)) {
        assert!(result.path.is_empty(), "{}", kind);
        assert_eq!(result.visited, 4, "{}", kind);
    }
}

fn carved_5x5(seed: u64) -> Grid {
    let mut generator = MazeGenerator::new(Some(seed));
    let mut grid = Grid::filled(5, 5, Cell::Wall);
    generator.carve_backbone(&mut grid);
    grid.set(Position::new(1, 1), Cell::Start).unwrap();
    grid.set(Position::new(3, 3), Cell::End).unwrap();
    grid
}

#[test]
fn backbone_only_maze_has_a_unique_route() {
    let start = Position::new(1, 1);
    let end = Position::new(3, 3);
    let via_top = vec![
        start,
        Position::new(1, 2),
        Position::new(1, 3),
        Position::new(2, 3),
        end,
    ];
    let via_left = vec![
        start,
        Position::new(2, 1),
        Position::new(3, 1),
        Position::new(3, 2),
        end,
    ];
    let connectors = [
        Position::new(1, 2),
        Position::new(2, 1),
        Position::new(2, 3),
        Position::new(3, 2),
    ];

    for seed in 0..16 {
        let grid = carved_5x5(seed);
        assert_eq!(grid, carved_5x5(seed), "seed {} is not reproducible", seed);

        // Four lattice cells joined by a tree: exactly one connector stays closed,
        // and it decides the only route between opposite corners.
        let closed: Vec<_> = connectors
            .iter()
            .copied()
            .filter(|&pos| grid.get(pos) == Some(Cell::Wall))
            .collect();
        assert_eq!(closed.len(), 1, "seed {}", seed);
        let expected = if closed[0] == Position::new(1, 2) || closed[0] == Position::new(2, 3) {
            &via_left
        } else {
            &via_top
        };

        for (kind, result) in run_all(&grid, start, end) {
            assert_eq!(&result.path, expected, "{} with seed {}", kind, seed);
        }
    }
}

#[test]
fn generated_mazes_bfs_and_a_star_agree_on_length() {
    let mut generator = MazeGenerator::new(Some(2024));
    for (size, complexity) in [(10, 0.1), (15, 0.3), (21, 0.5), (30, 0.7)] {
        for _ in 0..5 {
            let maze = generator.generate(size, size, complexity).unwrap();
            let results = run_all(&maze.grid, maze.start, maze.end);
            let bfs = &results[0].1;
            let dfs = &results[1].1;
            let a_star = &results[2].1;

            let reference = reference_length(&maze.grid, maze.start, maze.end).unwrap_or(0);
            assert_eq!(bfs.path.len(), a_star.path.len());
            assert_eq!(bfs.found(), dfs.found());
            for (kind, result) in results.iter().filter(|(kind, _)| kind.is_optimal()) {
                assert_eq!(result.path.len(), reference, "{} is not optimal", kind);
            }
            if bfs.found() {
                assert!(dfs.path.len() >= bfs.path.len());
                for (_, result) in &results {
                    assert_valid_path(&maze.grid, result, maze.start, maze.end);
                }
            }
        }
    }
}

#[test]
fn a_star_never_expands_more_than_bfs_on_open_grid() {
    let grid = Grid::filled(12, 12, Cell::Path);
    let start = Position::new(0, 0);
    let goal = Position::new(11, 11);
    let results = run_all(&grid, start, goal);
    assert_eq!(results[0].1.path.len(), 23);
    assert_eq!(results[2].1.path.len(), 23);
    assert!(results[2].1.visited <= results[0].1.visited);
}

#[test]
fn repeated_searches_are_identical_and_leave_grid_untouched() {
    let maze = MazeGenerator::new(Some(77)).generate(25, 25, 0.3).unwrap();
    let before = maze.grid.clone();
    let first = run_all(&maze.grid, maze.start, maze.end);
    let second = run_all(&maze.grid, maze.start, maze.end);
    assert_eq!(first, second);
    assert_eq!(before, maze.grid);
}

#[test]
fn out_of_bounds_endpoints_fail() {
    let grid = Grid::filled(5, 5, Cell::Path);
    for kind in AlgorithmKind::ALL {
        let algorithm = kind.algorithm();
        assert!(matches!(
            algorithm.find_path(&grid, Position::new(5, 0), Position::new(1, 1)),
            Err(MazeError::OutOfBounds { .. })
        ));
        assert!(matches!(
            algorithm.find_path(&grid, Position::new(1, 1), Position::new(0, 7)),
            Err(MazeError::OutOfBounds { .. })
        ));
    }
}
