//! Puzzle orchestration: problem setup, solutions, and model validation

pub mod problem;
pub mod solution;
pub mod validator;

pub use problem::{PuzzleOutcome, PuzzleProblem};
pub use solution::{CellMark, SolvedPuzzle};
pub use validator::{ClueMismatch, ModelValidator, ValidationResult};
