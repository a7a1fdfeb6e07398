//! Gem Hunter SAT Solver
//!
//! This library finds trap/gem assignments for clue grids by encoding each
//! puzzle as a CNF formula and solving it with one of three backends: a
//! from-scratch DPLL search, a brute-force enumerator, or an external SAT
//! oracle.

pub mod benchmark;
pub mod config;
pub mod grid;
pub mod puzzle;
pub mod sat;
pub mod utils;

pub use config::Settings;
pub use puzzle::{PuzzleOutcome, PuzzleProblem, SolvedPuzzle};

use anyhow::Result;

/// Main entry point for solving a configured gem hunter puzzle
pub fn solve_puzzle(settings: Settings) -> Result<PuzzleOutcome> {
    let problem = PuzzleProblem::new(settings)?;
    problem.solve()
}
