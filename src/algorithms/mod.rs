pub mod a_star;
pub mod bfs;
pub mod common;
pub mod dfs;
pub mod frontier;

#[cfg(test)]
mod test_search;

pub use a_star::{a_star, AStar};
pub use bfs::{bfs, Bfs};
pub use common::{AlgorithmKind, PathfindingAlgorithm, SearchResult};
pub use dfs::{dfs, Dfs};
