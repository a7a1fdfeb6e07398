//! Unified interface over the closed set of solver backends
//!
//! Backends are selected from configuration and share one capability:
//! `solve(grid, cnf) -> SolveReport`. Timing is measured here, strictly
//! around the solving step. `solve_with_deadline` adds wall-clock timeout
//! enforcement by abandoning the worker thread — safe because solvers share
//! no state across calls.

use super::{BruteForceSolver, Cnf, DpllSolver, OracleSolver, SolveReport};
use crate::config::SolverBackend;
use crate::grid::Grid;
use anyhow::Result;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Per-backend resource bounds
#[derive(Debug, Clone, Copy)]
pub struct SolverLimits {
    /// DPLL recursion depth bound
    pub max_depth: usize,
    /// Brute-force enumerable cell bound
    pub max_bruteforce_cells: usize,
}

impl Default for SolverLimits {
    fn default() -> Self {
        Self {
            max_depth: super::dpll::DEFAULT_MAX_DEPTH,
            max_bruteforce_cells: super::brute_force::DEFAULT_MAX_CELLS,
        }
    }
}

/// A solver instance of any backend
pub enum UnifiedSolver {
    Dpll(DpllSolver),
    BruteForce(BruteForceSolver),
    Oracle(OracleSolver),
}

impl UnifiedSolver {
    /// Create a solver for the given backend
    pub fn new(backend: SolverBackend, limits: &SolverLimits) -> Self {
        match backend {
            SolverBackend::Dpll => UnifiedSolver::Dpll(DpllSolver::new(limits.max_depth)),
            SolverBackend::BruteForce => {
                UnifiedSolver::BruteForce(BruteForceSolver::new(limits.max_bruteforce_cells))
            }
            SolverBackend::Oracle => UnifiedSolver::Oracle(OracleSolver::new()),
        }
    }

    /// The backend this solver implements
    pub fn backend(&self) -> SolverBackend {
        match self {
            UnifiedSolver::Dpll(_) => SolverBackend::Dpll,
            UnifiedSolver::BruteForce(_) => SolverBackend::BruteForce,
            UnifiedSolver::Oracle(_) => SolverBackend::Oracle,
        }
    }

    /// Human-readable backend name
    pub fn name(&self) -> &'static str {
        self.backend().name()
    }

    /// Solve the puzzle, timing the solving step only
    pub fn solve(&self, grid: &Grid, cnf: &Cnf) -> Result<SolveReport> {
        let start = Instant::now();
        let verdict = match self {
            UnifiedSolver::Dpll(solver) => solver.solve(cnf).verdict,
            UnifiedSolver::BruteForce(solver) => solver.solve(grid),
            UnifiedSolver::Oracle(solver) => solver.solve(cnf)?,
        };
        Ok(SolveReport::new(verdict, start.elapsed()))
    }
}

/// Run a solve on a worker thread and abandon it past the deadline.
///
/// The abandoned worker finishes (or keeps burning CPU) in the background
/// with its own copies of the grid and formula; no shared state is left
/// behind. The timed-out report carries the reserved sentinel instead of a
/// measured duration.
pub fn solve_with_deadline(
    backend: SolverBackend,
    limits: SolverLimits,
    grid: &Grid,
    cnf: &Cnf,
    timeout: Duration,
) -> Result<SolveReport> {
    let grid = grid.clone();
    let cnf = cnf.clone();
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        let solver = UnifiedSolver::new(backend, &limits);
        let report = solver.solve(&grid, &cnf);
        let _ = sender.send(report);
    });

    match receiver.recv_timeout(timeout) {
        Ok(report) => report,
        Err(mpsc::RecvTimeoutError::Timeout) => Ok(SolveReport::timed_out()),
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            anyhow::bail!("solver worker for {} exited without a result", backend.name())
        }
    }
}
