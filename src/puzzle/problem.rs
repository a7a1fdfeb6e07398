//! End-to-end puzzle solving: load, encode, solve, validate, save

use super::{ModelValidator, SolvedPuzzle};
use crate::config::{OutputFormat, Settings, SolverBackend};
use crate::grid::{load_grid_from_file, output_name_for_input, save_marks_to_file, Grid};
use crate::sat::{solve_with_deadline, Cnf, CnfBuilder, EncodingStatistics, SolveReport};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// A loaded puzzle with its formula built once; solve calls share both
pub struct PuzzleProblem {
    settings: Settings,
    grid: Grid,
    cnf: Cnf,
}

/// The result of one solve attempt
#[derive(Debug, Clone)]
pub struct PuzzleOutcome {
    pub backend: SolverBackend,
    pub report: SolveReport,
    /// Present only for a satisfiable verdict
    pub solution: Option<SolvedPuzzle>,
}

impl PuzzleProblem {
    /// Load the configured grid file and encode it
    pub fn new(settings: Settings) -> Result<Self> {
        let grid = load_grid_from_file(&settings.input.grid_file)?;
        Ok(Self::with_grid(settings, grid))
    }

    /// Wrap an already constructed grid
    pub fn with_grid(settings: Settings, grid: Grid) -> Self {
        let cnf = CnfBuilder::new(&grid).build();
        Self {
            settings,
            grid,
            cnf,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    /// Encoding statistics for the puzzle's formula
    pub fn statistics(&self) -> EncodingStatistics {
        CnfBuilder::new(&self.grid).statistics(&self.cnf)
    }

    /// Solve with the configured backend
    pub fn solve(&self) -> Result<PuzzleOutcome> {
        self.solve_with(self.settings.solver.backend)
    }

    /// Solve with a specific backend under the configured deadline.
    ///
    /// A satisfiable model is validated against the grid before it is
    /// accepted; a model that fails validation is a solver defect and
    /// surfaces as an error rather than a solution.
    pub fn solve_with(&self, backend: SolverBackend) -> Result<PuzzleOutcome> {
        let report = solve_with_deadline(
            backend,
            self.settings.limits(),
            &self.grid,
            &self.cnf,
            self.settings.timeout(),
        )?;

        let solution = match report.model() {
            Some(model) => {
                let validation = ModelValidator::new().validate(&self.grid, model);
                if !validation.is_valid {
                    anyhow::bail!(
                        "{} produced an invalid model: {}",
                        backend.name(),
                        validation.error_message.unwrap_or_default()
                    );
                }
                Some(SolvedPuzzle::new(
                    self.grid.clone(),
                    model.clone(),
                    backend.name(),
                    report.elapsed_ms,
                ))
            }
            None => None,
        };

        Ok(PuzzleOutcome {
            backend,
            report,
            solution,
        })
    }

    /// The output path derived from the input file name inside the configured
    /// output directory
    pub fn output_path(&self) -> PathBuf {
        let derived = output_name_for_input(&self.settings.input.grid_file);
        let name = derived
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("output.txt"));
        let mut path = self.settings.output.output_directory.join(name);
        if self.settings.output.format == OutputFormat::Json {
            path.set_extension("json");
        }
        path
    }

    /// Write a solution to the derived output path in the configured format
    pub fn save_solution(&self, solution: &SolvedPuzzle) -> Result<PathBuf> {
        let path = self.output_path();
        match self.settings.output.format {
            OutputFormat::Text => save_marks_to_file(&solution.mark_rows(), &path)?,
            OutputFormat::Json => {
                let json = solution.to_json().context("Failed to serialize solution")?;
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create directory: {}", parent.display())
                    })?;
                }
                std::fs::write(&path, json)
                    .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            }
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::Verdict;
    use tempfile::tempdir;

    fn problem_for(rows: Vec<Vec<u8>>) -> PuzzleProblem {
        let grid = Grid::from_rows(rows).unwrap();
        PuzzleProblem::with_grid(Settings::default(), grid)
    }

    #[test]
    fn test_solve_forced_trap() {
        let outcome = problem_for(vec![vec![1, 0]]).solve().unwrap();

        assert_eq!(outcome.backend, SolverBackend::Dpll);
        assert!(outcome.report.is_satisfiable());
        let solution = outcome.solution.unwrap();
        assert_eq!(solution.render(), "1 T\n");
    }

    #[test]
    fn test_solve_unsatisfiable_has_no_solution() {
        let outcome = problem_for(vec![vec![2, 0]]).solve().unwrap();
        assert_eq!(outcome.report.verdict, Verdict::Unsatisfiable);
        assert!(outcome.solution.is_none());
    }

    #[test]
    fn test_every_backend_solves_the_same_puzzle() {
        let problem = problem_for(vec![vec![3, 0], vec![0, 0]]);
        for backend in SolverBackend::ALL {
            let outcome = problem.solve_with(backend).unwrap();
            let solution = outcome
                .solution
                .unwrap_or_else(|| panic!("{} found no solution", backend.name()));
            assert_eq!(solution.trap_count(), 3);
        }
    }

    #[test]
    fn test_new_loads_grid_from_file() {
        let temp_dir = tempdir().unwrap();
        let grid_file = temp_dir.path().join("input_7.txt");
        std::fs::write(&grid_file, "1, _\n").unwrap();

        let mut settings = Settings::default();
        settings.input.grid_file = grid_file;
        let problem = PuzzleProblem::new(settings).unwrap();

        assert_eq!(problem.grid().rows(), 1);
        assert_eq!(problem.statistics().clause_count, 2);
    }

    #[test]
    fn test_save_solution_derives_output_name() {
        let temp_dir = tempdir().unwrap();
        let grid_file = temp_dir.path().join("input_7.txt");
        std::fs::write(&grid_file, "1, _\n").unwrap();

        let mut settings = Settings::default();
        settings.input.grid_file = grid_file;
        settings.output.output_directory = temp_dir.path().join("out");
        let problem = PuzzleProblem::new(settings).unwrap();

        let outcome = problem.solve().unwrap();
        let path = problem.save_solution(&outcome.solution.unwrap()).unwrap();

        assert_eq!(path.file_name().unwrap(), "output_7.txt");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1, T\n");
    }

    #[test]
    fn test_save_solution_json_format() {
        let temp_dir = tempdir().unwrap();
        let grid_file = temp_dir.path().join("input_2.txt");
        std::fs::write(&grid_file, "1, _\n").unwrap();

        let mut settings = Settings::default();
        settings.input.grid_file = grid_file;
        settings.output.output_directory = temp_dir.path().join("out");
        settings.output.format = OutputFormat::Json;
        let problem = PuzzleProblem::new(settings).unwrap();

        let outcome = problem.solve().unwrap();
        let path = problem.save_solution(&outcome.solution.unwrap()).unwrap();

        assert_eq!(path.file_name().unwrap(), "output_2.json");
        let loaded = SolvedPuzzle::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.solver, "dpll");
    }
}
