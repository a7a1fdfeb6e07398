//! Demonstration of the three solver backends
//!
//! This example encodes one small puzzle and solves it through the unified
//! interface with each backend in turn.

use gem_hunter::config::SolverBackend;
use gem_hunter::grid::Grid;
use gem_hunter::sat::{CnfBuilder, SolverLimits, UnifiedSolver};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Solver Backend Demonstration ===\n");

    let grid = Grid::from_rows(vec![
        vec![0, 0, 0, 0],
        vec![0, 2, 0, 1],
        vec![1, 0, 0, 0],
        vec![0, 0, 1, 0],
    ])?;
    println!("Puzzle:\n{}", grid);

    let cnf = CnfBuilder::new(&grid).build();
    println!(
        "Encoded as {} clauses over {} variables\n",
        cnf.len(),
        cnf.variables().len()
    );

    let limits = SolverLimits::default();
    for backend in SolverBackend::ALL {
        let solver = UnifiedSolver::new(backend, &limits);
        let report = solver.solve(&grid, &cnf)?;
        println!("{:11} -> {}", solver.name(), report);
    }

    Ok(())
}
