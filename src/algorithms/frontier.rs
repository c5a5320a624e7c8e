//! Search machinery shared by the three strategies.
//!
//! Every frontier entry is a node in a [`SearchTree`] that remembers its
//! parent, so a path is rebuilt by walking parent links instead of copying a
//! growing vector into each entry. The returned path is the same either way.

use crate::algorithms::common::{heuristic, validate_endpoints, SearchResult};
use crate::error::Result;
use crate::grid::{Grid, Position};
use log::trace;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

pub type NodeId = usize;

struct Node {
    pos: Position,
    parent: Option<NodeId>,
    depth: usize,
}

/// Arena of discovered nodes linked to their parents.
#[derive(Default)]
pub struct SearchTree {
    nodes: Vec<Node>,
}

impl SearchTree {
    pub fn insert(&mut self, pos: Position, parent: Option<NodeId>) -> NodeId {
        let depth = parent.map_or(0, |p| self.nodes[p].depth + 1);
        self.nodes.push(Node { pos, parent, depth });
        self.nodes.len() - 1
    }

    pub fn position(&self, id: NodeId) -> Position {
        self.nodes[id].pos
    }

    /// Edge count from the root to `id`.
    pub fn depth(&self, id: NodeId) -> usize {
        self.nodes[id].depth
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Positions from the root down to `id`.
    pub fn path_to(&self, id: NodeId) -> Vec<Position> {
        let mut path = Vec::with_capacity(self.nodes[id].depth + 1);
        let mut current = Some(id);
        while let Some(node) = current {
            path.push(self.nodes[node].pos);
            current = self.nodes[node].parent;
        }
        path.reverse();
        path
    }
}

/// Flat visited map indexed `row * cols + col`.
pub struct VisitedSet {
    cells: Vec<bool>,
    cols: usize,
    count: usize,
}

impl VisitedSet {
    pub fn new(grid: &Grid) -> Self {
        VisitedSet {
            cells: vec![false; grid.len()],
            cols: grid.cols(),
            count: 0,
        }
    }

    /// Marks `pos`; returns false if it was already visited.
    pub fn insert(&mut self, pos: Position) -> bool {
        let idx = pos.row * self.cols + pos.col;
        if self.cells[idx] {
            return false;
        }
        self.cells[idx] = true;
        self.count += 1;
        true
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells[pos.row * self.cols + pos.col]
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Order in which discovered nodes are expanded.
pub trait Frontier {
    /// `g` is the node's edge distance from the start.
    fn push(&mut self, id: NodeId, pos: Position, g: usize);

    fn pop(&mut self) -> Option<NodeId>;
}

/// First in, first out.
#[derive(Default)]
pub struct FifoFrontier(VecDeque<NodeId>);

impl Frontier for FifoFrontier {
    fn push(&mut self, id: NodeId, _pos: Position, _g: usize) {
        self.0.push_back(id);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.0.pop_front()
    }
}

/// Last in, first out.
#[derive(Default)]
pub struct LifoFrontier(Vec<NodeId>);

impl Frontier for LifoFrontier {
    fn push(&mut self, id: NodeId, _pos: Position, _g: usize) {
        self.0.push(id);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.0.pop()
    }
}

/// Priority key for A*: lowest `f`, then lowest `g`, then earliest insertion.
/// The heap is a max-heap, so `Ord` is reversed.
#[derive(Clone, Copy, PartialEq, Eq)]
struct Key {
    f: usize,
    g: usize,
    seq: u64,
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.g.cmp(&self.g))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-priority frontier ordered by `g + manhattan(pos, goal)`.
pub struct PriorityFrontier {
    heap: BinaryHeap<(Key, NodeId)>,
    goal: Position,
    next_seq: u64,
}

impl PriorityFrontier {
    pub fn new(goal: Position) -> Self {
        PriorityFrontier {
            heap: BinaryHeap::new(),
            goal,
            next_seq: 0,
        }
    }
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, id: NodeId, pos: Position, g: usize) {
        let key = Key {
            f: g + heuristic(pos, self.goal),
            g,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.heap.push((key, id));
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|(_, id)| id)
    }
}

/// Generic graph search over the grid.
///
/// Pops a node, skips it if already visited, otherwise marks it and either
/// returns the path (goal reached) or enqueues its unvisited traversable
/// neighbors in up/down/left/right order.
pub fn search<F: Frontier>(
    grid: &Grid,
    start: Position,
    goal: Position,
    mut frontier: F,
) -> Result<SearchResult> {
    validate_endpoints(grid, start, goal)?;

    let mut tree = SearchTree::default();
    let mut visited = VisitedSet::new(grid);

    let root = tree.insert(start, None);
    frontier.push(root, start, 0);

    while let Some(id) = frontier.pop() {
        let pos = tree.position(id);
        if !visited.insert(pos) {
            continue;
        }

        if pos == goal {
            trace!(
                "Reached {} after {} expansions ({} nodes discovered)",
                goal,
                visited.len(),
                tree.len()
            );
            return Ok(SearchResult {
                path: tree.path_to(id),
                visited: visited.len(),
            });
        }

        let g = tree.depth(id) + 1;
        for next in grid.get_neighbors(&pos) {
            if visited.contains(next) {
                continue;
            }
            let child = tree.insert(next, Some(id));
            frontier.push(child, next, g);
        }
    }

    trace!("Frontier exhausted after {} expansions", visited.len());
    Ok(SearchResult::not_found(visited.len()))
}
