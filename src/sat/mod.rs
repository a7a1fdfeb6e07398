//! SAT components: CNF model, grid encoder, and the solver backends

pub mod brute_force;
pub mod cnf;
pub mod dpll;
pub mod encoder;
pub mod oracle;
pub mod outcome;
pub mod solver_factory;

pub use brute_force::BruteForceSolver;
pub use cnf::{Clause, Cnf, Model};
pub use dpll::{DpllOutcome, DpllSolver, DpllStats};
pub use encoder::{CnfBuilder, EncodingStatistics};
pub use oracle::OracleSolver;
pub use outcome::{AbortReason, SolveReport, Verdict, TIMEOUT_SENTINEL_MS};
pub use solver_factory::{solve_with_deadline, SolverLimits, UnifiedSolver};
