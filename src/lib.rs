//! Randomized grid mazes solved with BFS, DFS and A*, with tooling to compare
//! path length, visited nodes and running time across many mazes.

pub mod algorithms;
pub mod batch_simulation;
pub mod config;
pub mod error;
pub mod grid;
pub mod maze;
pub mod simulation;
pub mod statistics;

pub use algorithms::{a_star, bfs, dfs, AlgorithmKind, PathfindingAlgorithm, SearchResult};
pub use error::{MazeError, Result};
pub use grid::{Cell, Grid, Position};
pub use maze::{generate_maze, Maze, MazeGenerator};
