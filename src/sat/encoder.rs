//! CNF encoding of gem hunter grids
//!
//! Each clue cell with value `k` and unknown-neighbor set of size `n`
//! contributes:
//! - the unit clause asserting the clue cell itself is not a trap,
//! - "at least k traps": one all-positive clause per combination of
//!   `n - k + 1` neighbors (at least one of any such group is a trap),
//! - "at most k traps" (only when `k < n`): one all-negative clause per
//!   combination of `k + 1` neighbors (at least one of any such group is a
//!   gem).
//!
//! A clue larger than its neighbor count is structurally unsatisfiable; the
//! builder still produces a formula (containing the empty clause) and leaves
//! the refutation to the solvers.

use super::{Clause, Cnf};
use crate::grid::Grid;
use itertools::Itertools;
use std::fmt;

/// Builds the CNF formula for a grid
pub struct CnfBuilder<'a> {
    grid: &'a Grid,
}

impl<'a> CnfBuilder<'a> {
    /// Create a builder for the given grid
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    /// Build the deduplicated clause set for the grid.
    ///
    /// Deterministic: two builds from the same grid yield identical formulas.
    pub fn build(&self) -> Cnf {
        let mut cnf = Cnf::new();

        for (row, col, clue) in self.grid.clue_cells() {
            // A numbered cell is never itself a trap.
            cnf.insert(Clause::unit(-self.grid.variable(row, col)));

            let neighbors = self.grid.neighbors(row, col);
            let n = neighbors.len();
            let k = clue as usize;
            if n == 0 {
                continue;
            }

            if k > n {
                // More traps demanded than neighbors exist: the at-least
                // constraint collapses to the empty clause.
                cnf.insert(Clause::new(Vec::new()));
                continue;
            }

            // At least k traps: every group of n - k + 1 neighbors holds one.
            for combination in neighbors.iter().copied().combinations(n - k + 1) {
                let literals = combination
                    .into_iter()
                    .map(|(r, c)| self.grid.variable(r, c))
                    .collect();
                cnf.insert(Clause::new(literals));
            }

            // At most k traps: every group of k + 1 neighbors holds a gem.
            if k < n {
                for combination in neighbors.iter().copied().combinations(k + 1) {
                    let literals = combination
                        .into_iter()
                        .map(|(r, c)| -self.grid.variable(r, c))
                        .collect();
                    cnf.insert(Clause::new(literals));
                }
            }
        }

        cnf
    }

    /// Statistics for a built formula
    pub fn statistics(&self, cnf: &Cnf) -> EncodingStatistics {
        EncodingStatistics {
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            clue_cells: self.grid.clue_cells().len(),
            constrained_cells: self.grid.constrained_unknowns().len(),
            clause_count: cnf.len(),
            variable_count: cnf.variables().len(),
        }
    }
}

/// Statistics about a grid's CNF encoding
#[derive(Debug, Clone)]
pub struct EncodingStatistics {
    pub rows: usize,
    pub cols: usize,
    pub clue_cells: usize,
    pub constrained_cells: usize,
    pub clause_count: usize,
    pub variable_count: usize,
}

impl fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CNF Encoding Statistics:")?;
        writeln!(f, "  Grid: {}x{}", self.rows, self.cols)?;
        writeln!(f, "  Clue cells: {}", self.clue_cells)?;
        writeln!(f, "  Constrained unknowns: {}", self.constrained_cells)?;
        writeln!(f, "  Clauses: {}", self.clause_count)?;
        writeln!(f, "  Variables: {}", self.variable_count)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(rows: Vec<Vec<u8>>) -> Cnf {
        let grid = Grid::from_rows(rows).unwrap();
        CnfBuilder::new(&grid).build()
    }

    #[test]
    fn test_single_clue_single_neighbor() {
        // Clue 1 at var 1, its only neighbor is var 2: the clue cell is not
        // a trap, the neighbor must be one.
        let cnf = encode(vec![vec![1, 0]]);
        let clauses: Vec<_> = cnf.clauses().cloned().collect();
        assert_eq!(clauses, vec![Clause::unit(-1), Clause::unit(2)]);
    }

    #[test]
    fn test_clue_exceeding_neighbors_yields_empty_clause() {
        let cnf = encode(vec![vec![2, 0]]);
        assert!(cnf.has_empty_clause());
    }

    #[test]
    fn test_corner_clue_forces_all_neighbors() {
        // Corner clue 3 with exactly 3 unknown neighbors: at-least
        // combinations of size 1 are unit clauses forcing every neighbor to
        // be a trap, and no at-most clauses are emitted (k == n).
        let cnf = encode(vec![vec![3, 0], vec![0, 0]]);
        let clauses: Vec<_> = cnf.clauses().cloned().collect();
        assert_eq!(
            clauses,
            vec![
                Clause::unit(-1),
                Clause::unit(2),
                Clause::unit(3),
                Clause::unit(4)
            ]
        );
    }

    #[test]
    fn test_center_clue_combination_counts() {
        // Center clue 2 with 8 neighbors: C(8, 7) at-least clauses plus
        // C(8, 3) at-most clauses plus the clue-cell unit clause.
        let cnf = encode(vec![vec![0, 0, 0], vec![0, 2, 0], vec![0, 0, 0]]);
        assert_eq!(cnf.len(), 1 + 8 + 56);

        let clue_var = 5;
        assert!(cnf.clauses().any(|c| *c == Clause::unit(-clue_var)));
        // At-most clauses are all-negative triples that never mention the clue.
        assert!(cnf
            .clauses()
            .filter(|c| c.len() == 3)
            .all(|c| c.literals().iter().all(|&lit| lit < 0 && lit != -clue_var)));
    }

    #[test]
    fn test_build_is_deterministic() {
        let grid = Grid::from_rows(vec![vec![0, 2, 0], vec![1, 0, 0], vec![0, 0, 1]]).unwrap();
        let a = CnfBuilder::new(&grid).build();
        let b = CnfBuilder::new(&grid).build();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rebuild_and_merge_adds_nothing() {
        let grid = Grid::from_rows(vec![vec![0, 2, 0], vec![1, 0, 0]]).unwrap();
        let mut a = CnfBuilder::new(&grid).build();
        let b = CnfBuilder::new(&grid).build();

        let before = a.len();
        a.merge(&b);
        assert_eq!(a.len(), before);
    }

    #[test]
    fn test_statistics() {
        let grid = Grid::from_rows(vec![vec![1, 0]]).unwrap();
        let builder = CnfBuilder::new(&grid);
        let cnf = builder.build();
        let stats = builder.statistics(&cnf);

        assert_eq!(stats.clue_cells, 1);
        assert_eq!(stats.constrained_cells, 1);
        assert_eq!(stats.clause_count, 2);
        assert_eq!(stats.variable_count, 2);
    }
}
