use crate::error::{MazeError, Result};
use std::fmt;

/// Zero-based (row, column) coordinate. Ordering is row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Manhattan distance between two positions.
    pub fn manhattan(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Path,
    Start,
    End,
}

impl Cell {
    /// Exchange code shared with rendering and export: 0=Wall, 1=Path, 2=Start, 3=End.
    pub const fn code(self) -> u8 {
        match self {
            Cell::Wall => 0,
            Cell::Path => 1,
            Cell::Start => 2,
            Cell::End => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Cell> {
        match code {
            0 => Some(Cell::Wall),
            1 => Some(Cell::Path),
            2 => Some(Cell::Start),
            3 => Some(Cell::End),
            _ => None,
        }
    }

    pub const fn is_traversable(self) -> bool {
        !matches!(self, Cell::Wall)
    }
}

/// Exploration order for neighbors: up, down, left, right.
///
/// Searches enqueue neighbors in exactly this order, which decides which of
/// several equal-cost paths gets returned.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Rectangular grid of cells stored row-major in a flat vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every cell set to `fill`.
    pub fn filled(rows: usize, cols: usize, fill: Cell) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![fill; rows * cols],
        }
    }

    /// Builds a grid from exchange codes. Rows must all have the same length.
    pub fn from_codes(codes: &[Vec<u8>]) -> Result<Self> {
        let rows = codes.len();
        let cols = codes.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(MazeError::invalid("grid must have at least one row and one column"));
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for (row, line) in codes.iter().enumerate() {
            if line.len() != cols {
                return Err(MazeError::invalid(format!(
                    "row {} has {} columns, expected {}",
                    row,
                    line.len(),
                    cols
                )));
            }
            for &code in line {
                let cell = Cell::from_code(code)
                    .ok_or_else(|| MazeError::invalid(format!("unknown cell code {}", code)))?;
                cells.push(cell);
            }
        }

        Ok(Grid { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// True when `pos` lies strictly inside the outer border.
    pub fn is_interior(&self, pos: Position) -> bool {
        pos.row >= 1 && pos.col >= 1 && pos.row + 1 < self.rows && pos.col + 1 < self.cols
    }

    /// Flat index of an in-bounds position.
    pub fn index(&self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }

    pub fn get(&self, pos: Position) -> Option<Cell> {
        if self.in_bounds(pos) {
            Some(self.cells[self.index(pos)])
        } else {
            None
        }
    }

    pub fn set(&mut self, pos: Position, cell: Cell) -> Result<()> {
        self.check_bounds(pos)?;
        let idx = self.index(pos);
        self.cells[idx] = cell;
        Ok(())
    }

    /// Writes a cell the caller already knows to be in bounds.
    pub(crate) fn put(&mut self, pos: Position, cell: Cell) {
        let idx = self.index(pos);
        self.cells[idx] = cell;
    }

    pub fn check_bounds(&self, pos: Position) -> Result<()> {
        if self.in_bounds(pos) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                position: pos,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn is_traversable(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(Cell::is_traversable)
    }

    /// Traversable neighbors of `pos` in the fixed up/down/left/right order.
    pub fn get_neighbors(&self, pos: &Position) -> impl Iterator<Item = Position> + '_ {
        let origin = *pos;
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let row = origin.row.checked_add_signed(dr)?;
            let col = origin.col.checked_add_signed(dc)?;
            let next = Position { row, col };
            self.is_traversable(next).then_some(next)
        })
    }

    /// Number of cells that are not walls.
    pub fn path_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_traversable()).count()
    }

    /// Positions currently holding `cell`, in row-major order.
    pub fn positions_of(&self, cell: Cell) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == cell)
            .map(|(idx, _)| Position {
                row: idx / self.cols,
                col: idx % self.cols,
            })
            .collect()
    }

    /// Dense row-major code matrix consumed by plotting and export.
    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|cell| cell.code()).collect())
            .collect()
    }

    /// ASCII picture of the grid, optionally with a path overlaid.
    pub fn render(&self, path: Option<&[Position]>) -> String {
        let mut on_path = vec![false; self.cells.len()];
        if let Some(path) = path {
            for &pos in path.iter().filter(|p| self.in_bounds(**p)) {
                on_path[self.index(pos)] = true;
            }
        }

        let mut out = String::with_capacity(self.rows * (self.cols * 2 + 1));
        for row in 0..self.rows {
            for col in 0..self.cols {
                let idx = row * self.cols + col;
                let symbol = match self.cells[idx] {
                    Cell::Start => 'S',
                    Cell::End => 'E',
                    _ if on_path[idx] => '*',
                    Cell::Wall => '#',
                    Cell::Path => '.',
                };
                out.push(symbol);
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }

    /// Print a visual representation of the grid with row/column headers.
    pub fn print_grid(&self, path: Option<&[Position]>) {
        println!("Legend: S=Start, E=End, *=Path, #=Wall, .=Open");

        print!("   ");
        for col in 0..self.cols {
            print!("{:2}", col % 10);
        }
        println!();

        for (row, line) in self.render(path).lines().enumerate() {
            println!("{:2} {}", row, line);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::from_codes(&[
            vec![0, 0, 0, 0],
            vec![0, 2, 1, 0],
            vec![0, 0, 3, 0],
            vec![0, 0, 0, 0],
        ])
        .unwrap()
    }

    #[test]
    fn codes_survive_conversion() {
        let grid = sample();
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.get(Position::new(1, 1)), Some(Cell::Start));
        assert_eq!(grid.get(Position::new(2, 2)), Some(Cell::End));
        assert_eq!(grid.to_codes()[1], vec![0, 2, 1, 0]);
    }

    #[test]
    fn zero_width_grid_exports_empty_rows() {
        let grid = Grid::filled(3, 0, Cell::Wall);
        assert!(grid.is_empty());
        assert_eq!(grid.to_codes(), vec![Vec::<u8>::new(); 3]);
        assert!(Grid::filled(0, 4, Cell::Path).to_codes().is_empty());
        assert_eq!(grid.render(None), "\n\n\n");
    }

    #[test]
    fn ragged_or_unknown_codes_are_rejected() {
        assert!(matches!(
            Grid::from_codes(&[vec![0, 0], vec![0]]),
            Err(MazeError::InvalidParameter { .. })
        ));
        assert!(matches!(
            Grid::from_codes(&[vec![0, 7]]),
            Err(MazeError::InvalidParameter { .. })
        ));
        assert!(Grid::from_codes(&[]).is_err());
    }

    #[test]
    fn neighbors_follow_up_down_left_right() {
        let grid = Grid::filled(3, 3, Cell::Path);
        let neighbors: Vec<_> = grid.get_neighbors(&Position::new(1, 1)).collect();
        assert_eq!(
            neighbors,
            vec![
                Position::new(0, 1),
                Position::new(2, 1),
                Position::new(1, 0),
                Position::new(1, 2),
            ]
        );
    }

    #[test]
    fn neighbors_skip_walls_and_edges() {
        let grid = sample();
        let neighbors: Vec<_> = grid.get_neighbors(&Position::new(1, 1)).collect();
        assert_eq!(neighbors, vec![Position::new(1, 2)]);

        let corner = Grid::filled(2, 2, Cell::Path);
        let neighbors: Vec<_> = corner.get_neighbors(&Position::new(0, 0)).collect();
        assert_eq!(neighbors, vec![Position::new(1, 0), Position::new(0, 1)]);
    }

    #[test]
    fn set_out_of_bounds_fails() {
        let mut grid = Grid::filled(3, 3, Cell::Wall);
        let err = grid.set(Position::new(3, 0), Cell::Path).unwrap_err();
        assert!(matches!(err, MazeError::OutOfBounds { rows: 3, cols: 3, .. }));
    }

    #[test]
    fn interior_excludes_border() {
        let grid = Grid::filled(4, 5, Cell::Wall);
        assert!(grid.is_interior(Position::new(1, 1)));
        assert!(grid.is_interior(Position::new(2, 3)));
        assert!(!grid.is_interior(Position::new(0, 2)));
        assert!(!grid.is_interior(Position::new(3, 2)));
        assert!(!grid.is_interior(Position::new(2, 4)));
    }

    #[test]
    fn render_overlays_path() {
        let grid = sample();
        let path = [Position::new(1, 1), Position::new(1, 2), Position::new(2, 2)];
        let picture = grid.render(Some(&path[..]));
        let lines: Vec<_> = picture.lines().collect();
        assert_eq!(lines[1], "# S * # ");
        assert_eq!(lines[2], "# # E # ");
    }

    #[test]
    fn path_cell_count_counts_non_walls() {
        assert_eq!(sample().path_cell_count(), 3);
        assert_eq!(sample().positions_of(Cell::Start), vec![Position::new(1, 1)]);
    }
}
