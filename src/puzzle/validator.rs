//! Independent validation of solver models against the grid's clues

use crate::grid::Grid;
use crate::sat::Model;
use std::fmt;

/// A clue whose neighborhood disagrees with the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClueMismatch {
    pub row: usize,
    pub col: usize,
    pub clue: u8,
    /// Traps the model actually places around the clue
    pub counted: usize,
}

impl fmt::Display for ClueMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "clue {} at ({}, {}) sees {} traps",
            self.clue, self.row, self.col, self.counted
        )
    }
}

/// Outcome of validating one model
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Clues whose trap counts are wrong
    pub mismatches: Vec<ClueMismatch>,
    /// Clue cells the model asserts to be traps
    pub trap_clues: Vec<(usize, usize)>,
    pub error_message: Option<String>,
}

impl ValidationResult {
    fn valid() -> Self {
        Self {
            is_valid: true,
            mismatches: Vec::new(),
            trap_clues: Vec::new(),
            error_message: None,
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            write!(f, "model satisfies every clue")
        } else {
            write!(
                f,
                "invalid model: {}",
                self.error_message.as_deref().unwrap_or("unknown failure")
            )
        }
    }
}

/// Checks models straight against the grid, independent of the CNF encoding
#[derive(Debug, Default, Clone)]
pub struct ModelValidator;

impl ModelValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check that the model places exactly `clue` traps around every clue
    /// cell and never marks a clue cell itself as a trap.
    ///
    /// Unassigned variables count as gems, mirroring how solved grids are
    /// rendered.
    pub fn validate(&self, grid: &Grid, model: &Model) -> ValidationResult {
        let mut result = ValidationResult::valid();

        for (row, col, clue) in grid.clue_cells() {
            if model.value_of(grid.variable(row, col)) == Some(true) {
                result.trap_clues.push((row, col));
            }

            let counted = grid
                .neighbors(row, col)
                .into_iter()
                .filter(|&(r, c)| model.value_of(grid.variable(r, c)) == Some(true))
                .count();
            if counted != clue as usize {
                result.mismatches.push(ClueMismatch {
                    row,
                    col,
                    clue,
                    counted,
                });
            }
        }

        if !result.mismatches.is_empty() || !result.trap_clues.is_empty() {
            result.is_valid = false;
            let mut parts: Vec<String> =
                result.mismatches.iter().map(ClueMismatch::to_string).collect();
            for &(row, col) in &result.trap_clues {
                parts.push(format!("clue cell ({}, {}) is marked as a trap", row, col));
            }
            result.error_message = Some(parts.join("; "));
        }

        result
    }
}
