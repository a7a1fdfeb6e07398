//! Grid representation and neighbor queries for gem hunter puzzles

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Cell value marking an unknown cell (either a trap or a gem)
pub const UNKNOWN: u8 = 0;

/// Largest clue value a cell can carry (8 neighbors)
pub const MAX_CLUE: u8 = 8;

/// The eight neighbor offsets in the fixed scan order:
/// up, down, left, right, up-left, up-right, down-left, down-right.
///
/// This order determines which neighbor combinations the encoder emits first
/// and must stay stable for reproducible clause sets.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Errors raised while constructing a grid
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid cannot be empty")]
    Empty,

    #[error("row {row} has length {len}, expected {expected} (all rows must have the same length)")]
    NonRectangular {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("cell ({row}, {col}) has value {value}, expected 0 (unknown) or a clue in 1..=8")]
    InvalidValue { row: usize, col: usize, value: u8 },
}

/// An immutable gem hunter grid.
///
/// Cells hold `0` for unknown (trap or gem) and `1..=8` for a clue counting
/// the traps among the cell's neighbors. The grid never changes after
/// construction; solvers work on copies of derived state only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Create a grid from a 2D array of cell values
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, GridError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(GridError::Empty);
        }

        let cols = rows[0].len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::NonRectangular {
                    row: i,
                    len: row.len(),
                    expected: cols,
                });
            }
            for (j, &value) in row.iter().enumerate() {
                if value > MAX_CLUE {
                    return Err(GridError::InvalidValue {
                        row: i,
                        col: j,
                        value,
                    });
                }
            }
        }

        let height = rows.len();
        let cells: Vec<u8> = rows.into_iter().flatten().collect();

        Ok(Self {
            rows: height,
            cols,
            cells,
        })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Convert 2D coordinates to the flat storage index
    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Get the value at the given coordinates
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[self.index(row, col)]
    }

    /// Whether the cell is unknown (candidate trap or gem)
    pub fn is_unknown(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == UNKNOWN
    }

    /// Whether the cell carries a clue
    pub fn is_clue(&self, row: usize, col: usize) -> bool {
        self.get(row, col) != UNKNOWN
    }

    /// The CNF variable for a cell: `row * cols + col + 1`.
    ///
    /// Variables are 1-based so a literal's sign can carry the polarity
    /// (positive asserts a trap, negative a gem).
    pub fn variable(&self, row: usize, col: usize) -> i32 {
        (self.index(row, col) + 1) as i32
    }

    /// Invert the variable mapping back to (row, col)
    pub fn cell_of_variable(&self, var: i32) -> Option<(usize, usize)> {
        let index = var.unsigned_abs() as usize;
        if index == 0 || index > self.cells.len() {
            return None;
        }
        let index = index - 1;
        Some((index / self.cols, index % self.cols))
    }

    /// The in-bounds, unknown-valued neighbors of a cell in the fixed scan
    /// order. The cell's own value is not inspected.
    pub fn neighbors(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        let mut neighbors = Vec::with_capacity(8);
        for &(dr, dc) in NEIGHBOR_OFFSETS.iter() {
            let r = row as isize + dr;
            let c = col as isize + dc;
            if r >= 0
                && r < self.rows as isize
                && c >= 0
                && c < self.cols as isize
                && self.is_unknown(r as usize, c as usize)
            {
                neighbors.push((r as usize, c as usize));
            }
        }
        neighbors
    }

    /// All clue cells as (row, col, clue) in row-major order
    pub fn clue_cells(&self) -> Vec<(usize, usize, u8)> {
        let mut clues = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let value = self.get(row, col);
                if value != UNKNOWN {
                    clues.push((row, col, value));
                }
            }
        }
        clues
    }

    /// Unknown cells adjacent to at least one clue, in first-seen order over
    /// the row-major clue scan.
    ///
    /// Unknown cells with no adjacent clue are unconstrained and excluded;
    /// they are rendered as `_` in solved output.
    pub fn constrained_unknowns(&self) -> Vec<(usize, usize)> {
        let mut scoped = Vec::new();
        for (row, col, _) in self.clue_cells() {
            for cell in self.neighbors(row, col) {
                if !scoped.contains(&cell) {
                    scoped.push(cell);
                }
            }
        }
        scoped
    }

    /// Count unknown cells in the whole grid
    pub fn unknown_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == UNKNOWN).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if col > 0 {
                    write!(f, " ")?;
                }
                match self.get(row, col) {
                    UNKNOWN => write!(f, "_")?,
                    clue => write!(f, "{}", clue)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::from_rows(vec![vec![0, 1, 0], vec![2, 0, 0]]).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.get(0, 1), 1);
        assert_eq!(grid.get(1, 0), 2);
        assert!(grid.is_unknown(0, 0));
        assert!(grid.is_clue(1, 0));
        assert_eq!(grid.unknown_count(), 4);
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert_eq!(Grid::from_rows(vec![]), Err(GridError::Empty));
        assert_eq!(Grid::from_rows(vec![vec![]]), Err(GridError::Empty));
    }

    #[test]
    fn test_non_rectangular_rejected() {
        let err = Grid::from_rows(vec![vec![0, 1, 0], vec![0, 1]]).unwrap_err();
        assert_eq!(
            err,
            GridError::NonRectangular {
                row: 1,
                len: 2,
                expected: 3
            }
        );
    }

    #[test]
    fn test_out_of_range_value_rejected() {
        let err = Grid::from_rows(vec![vec![0, 9]]).unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidValue {
                row: 0,
                col: 1,
                value: 9
            }
        );
    }

    #[test]
    fn test_variable_mapping() {
        let grid = Grid::from_rows(vec![vec![0, 0, 0], vec![0, 0, 0]]).unwrap();
        assert_eq!(grid.variable(0, 0), 1);
        assert_eq!(grid.variable(0, 2), 3);
        assert_eq!(grid.variable(1, 0), 4);
        assert_eq!(grid.variable(1, 2), 6);

        assert_eq!(grid.cell_of_variable(1), Some((0, 0)));
        assert_eq!(grid.cell_of_variable(-6), Some((1, 2)));
        assert_eq!(grid.cell_of_variable(0), None);
        assert_eq!(grid.cell_of_variable(7), None);
    }

    #[test]
    fn test_neighbors_scan_order() {
        // Single clue 2 in the center of a 3x3, everything else unknown:
        // all 8 surrounding cells come back in the fixed scan order.
        let grid = Grid::from_rows(vec![vec![0, 0, 0], vec![0, 2, 0], vec![0, 0, 0]]).unwrap();
        assert_eq!(
            grid.neighbors(1, 1),
            vec![
                (0, 1),
                (2, 1),
                (1, 0),
                (1, 2),
                (0, 0),
                (0, 2),
                (2, 0),
                (2, 2)
            ]
        );
    }

    #[test]
    fn test_neighbors_respect_bounds_and_clues() {
        let grid = Grid::from_rows(vec![vec![1, 0], vec![3, 0]]).unwrap();
        // Corner cell: out-of-bounds cells and the clue at (1, 0) are skipped.
        assert_eq!(grid.neighbors(0, 0), vec![(0, 1), (1, 1)]);
        assert_eq!(grid.neighbors(1, 0), vec![(1, 1), (0, 1)]);
    }

    #[test]
    fn test_constrained_unknowns_order() {
        // Clue at (0, 0) scopes (0, 1), (1, 0), (1, 1); the far cell (2, 2)
        // touches no clue and stays unconstrained.
        let grid = Grid::from_rows(vec![
            vec![2, 0, 0],
            vec![0, 0, 0],
            vec![0, 0, 0],
        ])
        .unwrap();
        let scoped = grid.constrained_unknowns();
        assert_eq!(scoped, vec![(1, 0), (0, 1), (1, 1)]);
        assert!(!scoped.contains(&(2, 2)));
    }
}
