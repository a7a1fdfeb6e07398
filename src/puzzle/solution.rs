//! Solved-puzzle representation and rendering

use crate::grid::Grid;
use crate::sat::Model;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The resolved state of one cell in a solved puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellMark {
    /// The original clue value
    Clue(u8),
    /// An unknown cell deduced to be a trap
    Trap,
    /// An unknown cell deduced to be a gem
    Gem,
    /// An unknown cell adjacent to no clue; the model says nothing about it
    Unconstrained,
}

impl CellMark {
    /// The output-file symbol for this mark
    pub fn symbol(&self) -> String {
        match self {
            CellMark::Clue(value) => value.to_string(),
            CellMark::Trap => "T".to_string(),
            CellMark::Gem => "G".to_string(),
            CellMark::Unconstrained => "_".to_string(),
        }
    }
}

/// A satisfying assignment rendered back onto its grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolvedPuzzle {
    pub grid: Grid,
    pub model: Model,
    /// Backend that produced the model
    pub solver: String,
    /// Solve time in milliseconds
    pub elapsed_ms: f64,
    marks: Vec<Vec<CellMark>>,
}

impl SolvedPuzzle {
    /// Render a model onto the grid.
    ///
    /// Clue cells keep their value; constrained unknowns become traps or
    /// gems per the model (an unassigned or negative variable is a gem);
    /// unknowns out of every clue's reach stay unconstrained.
    pub fn new(grid: Grid, model: Model, solver: &str, elapsed_ms: f64) -> Self {
        let scoped: HashSet<(usize, usize)> = grid.constrained_unknowns().into_iter().collect();

        let marks = (0..grid.rows())
            .map(|row| {
                (0..grid.cols())
                    .map(|col| {
                        if grid.is_clue(row, col) {
                            CellMark::Clue(grid.get(row, col))
                        } else if !scoped.contains(&(row, col)) {
                            CellMark::Unconstrained
                        } else if model.value_of(grid.variable(row, col)) == Some(true) {
                            CellMark::Trap
                        } else {
                            CellMark::Gem
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            grid,
            model,
            solver: solver.to_string(),
            elapsed_ms,
            marks,
        }
    }

    /// The per-cell marks
    pub fn marks(&self) -> &[Vec<CellMark>] {
        &self.marks
    }

    /// Marks as output-file symbols
    pub fn mark_rows(&self) -> Vec<Vec<String>> {
        self.marks
            .iter()
            .map(|row| row.iter().map(CellMark::symbol).collect())
            .collect()
    }

    /// Render the solved grid as display text
    pub fn render(&self) -> String {
        let mut output = String::new();
        for row in &self.marks {
            for (i, mark) in row.iter().enumerate() {
                if i > 0 {
                    output.push(' ');
                }
                output.push_str(&mark.symbol());
            }
            output.push('\n');
        }
        output
    }

    /// Number of cells deduced to be traps
    pub fn trap_count(&self) -> usize {
        self.count_mark(CellMark::Trap)
    }

    /// Number of cells deduced to be gems
    pub fn gem_count(&self) -> usize {
        self.count_mark(CellMark::Gem)
    }

    fn count_mark(&self, mark: CellMark) -> usize {
        self.marks
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&m| m == mark)
            .count()
    }

    /// Convert to a pretty JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
