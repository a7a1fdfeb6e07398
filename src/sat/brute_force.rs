//! Exhaustive enumeration over candidate trap placements
//!
//! Correctness oracle and slow-path baseline: `O(2^u)` in the number of
//! clue-adjacent unknown cells, guarded by a configurable cell limit.
//! Works directly from the grid's clue counts rather than the CNF, so it
//! cross-checks the encoding as well as the search.

use super::{AbortReason, Model, Verdict};
use crate::grid::Grid;
use itertools::Itertools;
use std::collections::HashSet;

/// Default upper bound on enumerated cells before the solver refuses
pub const DEFAULT_MAX_CELLS: usize = 25;

/// Brute-force subset enumerator
#[derive(Debug, Clone)]
pub struct BruteForceSolver {
    max_cells: usize,
}

impl Default for BruteForceSolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CELLS)
    }
}

impl BruteForceSolver {
    /// Create a solver refusing grids with more enumerable cells than the bound
    pub fn new(max_cells: usize) -> Self {
        Self { max_cells }
    }

    /// Enumerate candidate trap subsets of the clue-adjacent unknown cells.
    ///
    /// Candidates are tried in decreasing subset size, from the full cell set
    /// down to the empty set, and in combination order within a size; the
    /// first valid candidate wins. The order carries no semantics but is kept
    /// fixed so repeated runs return the same model when several exist.
    pub fn solve(&self, grid: &Grid) -> Verdict {
        let cells = grid.constrained_unknowns();
        if cells.len() > self.max_cells {
            return Verdict::Aborted(AbortReason::SearchSpaceTooLarge);
        }

        // Clue constraints, with neighbor sets computed once up front.
        let constraints: Vec<(u8, Vec<(usize, usize)>)> = grid
            .clue_cells()
            .into_iter()
            .map(|(row, col, clue)| (clue, grid.neighbors(row, col)))
            .collect();

        for trap_count in (0..=cells.len()).rev() {
            for candidate in cells.iter().copied().combinations(trap_count) {
                let traps: HashSet<(usize, usize)> = candidate.into_iter().collect();
                if is_valid_candidate(&constraints, &traps) {
                    let literals = cells.iter().map(|&(row, col)| {
                        let var = grid.variable(row, col);
                        if traps.contains(&(row, col)) {
                            var
                        } else {
                            -var
                        }
                    });
                    return Verdict::Satisfiable(Model::from_literals(literals));
                }
            }
        }

        Verdict::Unsatisfiable
    }
}

/// Check a candidate trap set against every clue's exact count
fn is_valid_candidate(
    constraints: &[(u8, Vec<(usize, usize)>)],
    traps: &HashSet<(usize, usize)>,
) -> bool {
    constraints.iter().all(|(clue, neighbors)| {
        let count = neighbors.iter().filter(|cell| traps.contains(cell)).count();
        count == *clue as usize
    })
}
