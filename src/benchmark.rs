//! Cross-solver benchmark harness
//!
//! Runs every backend on every discovered grid under the configured
//! deadline, in parallel across grids. Besides timings, the harness
//! cross-checks the backends: conclusive verdicts must agree, and every
//! satisfiable model must pass validation against its grid.

use crate::config::{Settings, SolverBackend};
use crate::grid::{load_grid_from_file, output_name_for_input, save_marks_to_file, Grid};
use crate::puzzle::{ModelValidator, SolvedPuzzle};
use crate::sat::{solve_with_deadline, Cnf, CnfBuilder, SolveReport, Verdict};
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One backend's result on one grid
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkEntry {
    pub backend: SolverBackend,
    pub report: SolveReport,
}

/// All backends' results on one grid
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkRow {
    pub grid_name: String,
    /// Entries in the fixed reporting order of [`SolverBackend::ALL`]
    pub entries: Vec<BenchmarkEntry>,
    /// False when conclusive verdicts conflict or a model fails validation
    pub solvers_agree: bool,
    /// Where the first satisfiable solution was written, if any
    pub output_file: Option<PathBuf>,
}

/// Runs the solver comparison over a set of grid files
pub struct BenchmarkRunner {
    settings: Settings,
}

impl BenchmarkRunner {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Find `input_*.txt` grid files in a directory, sorted by name
    pub fn discover_grids<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read grid directory: {}", dir.display()))?;

        let mut grids: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension().and_then(|e| e.to_str()) == Some("txt")
                    && path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .is_some_and(|stem| stem.starts_with("input_"))
            })
            .collect();
        grids.sort();
        Ok(grids)
    }

    /// Benchmark every grid file, one row per grid, in parallel
    pub fn run(&self, grid_files: &[PathBuf]) -> Result<Vec<BenchmarkRow>> {
        grid_files
            .par_iter()
            .map(|path| self.bench_grid_file(path))
            .collect()
    }

    fn bench_grid_file(&self, path: &Path) -> Result<BenchmarkRow> {
        let grid = load_grid_from_file(path)?;
        let grid_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("grid")
            .to_string();
        let mut row = self.bench_grid(&grid, grid_name)?;

        if self.settings.output.write_output {
            if let Some(solution) = first_solution(&grid, &row.entries) {
                let name = output_name_for_input(path)
                    .file_name()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("output.txt"));
                let output_path = self.settings.output.output_directory.join(name);
                save_marks_to_file(&solution.mark_rows(), &output_path)?;
                row.output_file = Some(output_path);
            }
        }

        Ok(row)
    }

    /// Run every backend on one grid and cross-check the verdicts
    pub fn bench_grid(&self, grid: &Grid, grid_name: String) -> Result<BenchmarkRow> {
        let cnf = CnfBuilder::new(grid).build();
        let mut entries = Vec::with_capacity(SolverBackend::ALL.len());

        for backend in SolverBackend::ALL {
            let report = self.bench_backend(backend, grid, &cnf)?;
            entries.push(BenchmarkEntry { backend, report });
        }

        let solvers_agree = verdicts_agree(grid, &entries);
        Ok(BenchmarkRow {
            grid_name,
            entries,
            solvers_agree,
            output_file: None,
        })
    }

    fn bench_backend(
        &self,
        backend: SolverBackend,
        grid: &Grid,
        cnf: &Cnf,
    ) -> Result<SolveReport> {
        solve_with_deadline(
            backend,
            self.settings.limits(),
            grid,
            cnf,
            self.settings.timeout(),
        )
    }
}

/// Conclusive verdicts must match, and every model must satisfy the clues.
/// Aborted and timed-out entries are excluded from the comparison.
fn verdicts_agree(grid: &Grid, entries: &[BenchmarkEntry]) -> bool {
    let validator = ModelValidator::new();
    let mut seen_sat = false;
    let mut seen_unsat = false;

    for entry in entries {
        match &entry.report.verdict {
            Verdict::Satisfiable(model) => {
                if !validator.validate(grid, model).is_valid {
                    return false;
                }
                seen_sat = true;
            }
            Verdict::Unsatisfiable => seen_unsat = true,
            Verdict::Aborted(_) | Verdict::TimedOut => {}
        }
    }

    !(seen_sat && seen_unsat)
}

/// The first satisfiable entry's model rendered onto the grid, following the
/// fixed reporting order
fn first_solution(grid: &Grid, entries: &[BenchmarkEntry]) -> Option<SolvedPuzzle> {
    entries.iter().find_map(|entry| {
        entry.report.model().map(|model| {
            SolvedPuzzle::new(
                grid.clone(),
                model.clone(),
                entry.backend.name(),
                entry.report.elapsed_ms,
            )
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::create_example_grids;
    use tempfile::tempdir;

    fn runner(settings: Settings) -> BenchmarkRunner {
        BenchmarkRunner::new(settings)
    }

    #[test]
    fn test_discover_grids_sorted() {
        let temp_dir = tempdir().unwrap();
        create_example_grids(temp_dir.path()).unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), "not a grid").unwrap();
        std::fs::write(temp_dir.path().join("output_1.txt"), "1, T\n").unwrap();

        let grids = BenchmarkRunner::discover_grids(temp_dir.path()).unwrap();
        let names: Vec<_> = grids
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["input_1.txt", "input_2.txt", "input_3.txt", "input_4.txt"]
        );
    }

    #[test]
    fn test_backends_agree_on_examples() {
        let temp_dir = tempdir().unwrap();
        create_example_grids(temp_dir.path()).unwrap();
        let grids = BenchmarkRunner::discover_grids(temp_dir.path()).unwrap();

        let mut settings = Settings::default();
        settings.output.write_output = false;
        let rows = runner(settings).run(&grids).unwrap();

        assert_eq!(rows.len(), 4);
        for row in &rows {
            assert!(row.solvers_agree, "disagreement on {}", row.grid_name);
            assert_eq!(row.entries.len(), SolverBackend::ALL.len());
        }

        // input_4.txt demands more traps than neighbors exist.
        let unsat = rows.iter().find(|r| r.grid_name == "input_4.txt").unwrap();
        for entry in &unsat.entries {
            assert_eq!(entry.report.verdict, Verdict::Unsatisfiable);
        }
    }

    #[test]
    fn test_writes_first_satisfiable_solution() {
        let temp_dir = tempdir().unwrap();
        create_example_grids(temp_dir.path()).unwrap();

        let mut settings = Settings::default();
        settings.output.output_directory = temp_dir.path().join("out");
        let rows = runner(settings)
            .run(&[temp_dir.path().join("input_1.txt")])
            .unwrap();

        let output = rows[0].output_file.as_ref().unwrap();
        assert_eq!(output.file_name().unwrap(), "output_1.txt");
        assert_eq!(std::fs::read_to_string(output).unwrap(), "1, T\n");
    }

    #[test]
    fn test_unsatisfiable_grid_writes_nothing() {
        let temp_dir = tempdir().unwrap();
        create_example_grids(temp_dir.path()).unwrap();

        let mut settings = Settings::default();
        settings.output.output_directory = temp_dir.path().join("out");
        let rows = runner(settings)
            .run(&[temp_dir.path().join("input_4.txt")])
            .unwrap();

        assert!(rows[0].output_file.is_none());
    }

    #[test]
    fn test_conflicting_verdicts_flagged() {
        let grid = Grid::from_rows(vec![vec![1, 0]]).unwrap();
        let entries = vec![
            BenchmarkEntry {
                backend: SolverBackend::Oracle,
                report: SolveReport::new(
                    Verdict::Unsatisfiable,
                    std::time::Duration::from_millis(1),
                ),
            },
            BenchmarkEntry {
                backend: SolverBackend::Dpll,
                report: SolveReport::new(
                    Verdict::Satisfiable(crate::sat::Model::from_literals([-1, 2])),
                    std::time::Duration::from_millis(1),
                ),
            },
        ];
        assert!(!verdicts_agree(&grid, &entries));
    }
}
