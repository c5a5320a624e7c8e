use crate::error::{MazeError, Result};
use crate::grid::{Cell, Grid, Position};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Fraction of the grid area used for braiding attempts, independent of complexity.
pub const BRAID_RATIO: f64 = 0.05;

/// Lattice steps used by the backbone carve: two cells at a time.
const CARVE_STEPS: [(isize, isize); 4] = [(0, 2), (2, 0), (0, -2), (-2, 0)];

/// A generated maze: the grid plus its Start and End coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Maze {
    pub grid: Grid,
    pub start: Position,
    pub end: Position,
    pub complexity: f64,
}

impl Maze {
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Moves the Start and End markers to custom coordinates.
    ///
    /// The old markers are turned into Path so the grid keeps exactly one
    /// Start and one End.
    pub fn restamp_endpoints(&mut self, start: Position, end: Position) -> Result<()> {
        self.grid.check_bounds(start)?;
        self.grid.check_bounds(end)?;
        if start == end {
            return Err(MazeError::invalid(format!(
                "start and end must differ, both are {}",
                start
            )));
        }

        self.grid.set(self.start, Cell::Path)?;
        self.grid.set(self.end, Cell::Path)?;
        self.grid.set(start, Cell::Start)?;
        self.grid.set(end, Cell::End)?;
        self.start = start;
        self.end = end;
        Ok(())
    }
}

/// One pending level of the backbone carve: a lattice cell and its shuffled steps.
struct CarveFrame {
    pos: Position,
    steps: [(isize, isize); 4],
    next: usize,
}

impl CarveFrame {
    fn new(pos: Position, rng: &mut StdRng) -> Self {
        let mut steps = CARVE_STEPS;
        steps.shuffle(rng);
        CarveFrame {
            pos,
            steps,
            next: 0,
        }
    }

    fn next_step(&mut self) -> Option<(isize, isize)> {
        let step = self.steps.get(self.next).copied();
        self.next += 1;
        step
    }
}

/// Randomized maze generator: a spanning backbone plus random wall removal.
pub struct MazeGenerator {
    rng: StdRng,
}

impl MazeGenerator {
    /// Creates a generator. The same seed always yields the same mazes.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };
        MazeGenerator { rng }
    }

    /// Generates a `rows` x `cols` maze whose openness grows with `complexity`.
    pub fn generate(&mut self, rows: usize, cols: usize, complexity: f64) -> Result<Maze> {
        validate_parameters(rows, cols, complexity)?;

        let mut grid = Grid::filled(rows, cols, Cell::Wall);
        self.carve_backbone(&mut grid);

        let area = (rows * cols) as f64;
        let extra_attempts = (complexity * area).floor() as usize;
        let extra_opened = self.open_random_walls(&mut grid, extra_attempts);

        let braid_attempts = (BRAID_RATIO * area).floor() as usize;
        let braid_opened = self.open_random_walls(&mut grid, braid_attempts);

        let (start, end) = self.place_endpoints(&mut grid);

        debug!(
            "Generated {}x{} maze (complexity {}): {} extra cells opened, {} braided, \
             start {}, end {}",
            rows, cols, complexity, extra_opened, braid_opened, start, end
        );

        Ok(Maze {
            grid,
            start,
            end,
            complexity,
        })
    }

    /// Carves a random spanning tree over the odd lattice, starting at (1, 1).
    ///
    /// Runs on an explicit stack but consumes the RNG exactly like the
    /// recursive carve would.
    pub fn carve_backbone(&mut self, grid: &mut Grid) {
        let origin = Position::new(1, 1);
        if !grid.is_interior(origin) {
            return;
        }

        grid.put(origin, Cell::Path);
        let mut stack = vec![CarveFrame::new(origin, &mut self.rng)];

        while let Some(frame) = stack.last_mut() {
            let Some((dr, dc)) = frame.next_step() else {
                stack.pop();
                continue;
            };
            let from = frame.pos;

            let (Some(row), Some(col)) = (
                from.row.checked_add_signed(dr),
                from.col.checked_add_signed(dc),
            ) else {
                continue;
            };
            let target = Position::new(row, col);
            if !grid.is_interior(target) || grid.get(target) != Some(Cell::Wall) {
                continue;
            }

            let between = Position::new(
                from.row.wrapping_add_signed(dr / 2),
                from.col.wrapping_add_signed(dc / 2),
            );
            grid.put(between, Cell::Path);
            grid.put(target, Cell::Path);
            stack.push(CarveFrame::new(target, &mut self.rng));
        }
    }

    /// Makes `attempts` uniform picks of interior cells, turning walls into Path.
    ///
    /// Returns how many walls were actually opened.
    pub fn open_random_walls(&mut self, grid: &mut Grid, attempts: usize) -> usize {
        let mut opened = 0;
        for _ in 0..attempts {
            let pos = self.random_interior(grid);
            if grid.get(pos) == Some(Cell::Wall) {
                grid.put(pos, Cell::Path);
                opened += 1;
            }
        }
        opened
    }

    /// Marks a random interior Start and a distinct random interior End.
    ///
    /// The grid must have at least two interior cells.
    pub fn place_endpoints(&mut self, grid: &mut Grid) -> (Position, Position) {
        let start = self.random_interior(grid);
        grid.put(start, Cell::Start);

        let mut end = self.random_interior(grid);
        while end == start {
            end = self.random_interior(grid);
        }
        grid.put(end, Cell::End);

        (start, end)
    }

    fn random_interior(&mut self, grid: &Grid) -> Position {
        Position {
            row: self.rng.gen_range(1..=grid.rows() - 2),
            col: self.rng.gen_range(1..=grid.cols() - 2),
        }
    }
}

/// Generates a maze with an entropy-seeded generator.
pub fn generate_maze(rows: usize, cols: usize, complexity: f64) -> Result<Maze> {
    MazeGenerator::new(None).generate(rows, cols, complexity)
}

fn validate_parameters(rows: usize, cols: usize, complexity: f64) -> Result<()> {
    if rows < 3 || cols < 3 {
        return Err(MazeError::invalid(format!(
            "maze must be at least 3x3, got {}x{}",
            rows, cols
        )));
    }
    if (rows - 2) * (cols - 2) < 2 {
        return Err(MazeError::invalid(format!(
            "a {}x{} maze has fewer than two interior cells for distinct start and end",
            rows, cols
        )));
    }
    validate_complexity(complexity)
}

/// Complexity must be a finite share of the grid area.
pub(crate) fn validate_complexity(complexity: f64) -> Result<()> {
    if !complexity.is_finite() || !(0.0..=1.0).contains(&complexity) {
        return Err(MazeError::invalid(format!(
            "complexity must be within [0, 1], got {}",
            complexity
        )));
    }
    Ok(())
}
