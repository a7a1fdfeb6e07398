//! Display and output formatting utilities

use crate::benchmark::{BenchmarkEntry, BenchmarkRow};
use crate::puzzle::{PuzzleOutcome, SolvedPuzzle};
use crate::sat::EncodingStatistics;

/// Formats puzzles, outcomes, and benchmark tables for console output
pub struct PuzzleFormatter;

impl PuzzleFormatter {
    /// Format a single solve outcome for console output
    pub fn format_outcome(outcome: &PuzzleOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== Solver: {} ===\n", outcome.backend.name()));
        output.push_str(&format!("Result: {}\n", outcome.report));

        if let Some(solution) = &outcome.solution {
            output.push_str(&format!(
                "Traps: {}  Gems: {}\n\n",
                solution.trap_count(),
                solution.gem_count()
            ));
            output.push_str(&solution.render());
        }

        output
    }

    /// Format a solved grid with its solver and timing
    pub fn format_solution(solution: &SolvedPuzzle) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "Solved by {} in {:.2} ms\n\n",
            solution.solver, solution.elapsed_ms
        ));
        output.push_str(&solution.render());
        output
    }

    /// Format CNF encoding statistics
    pub fn format_statistics(stats: &EncodingStatistics) -> String {
        stats.to_string()
    }

    /// Format benchmark rows as a summary table.
    ///
    /// Timed-out solves print `timeout` in the timing column; the sentinel
    /// never appears as a number.
    pub fn format_benchmark_table(rows: &[BenchmarkRow]) -> String {
        let mut output = String::new();

        output.push_str("Benchmark Summary:\n");
        output.push_str("Grid            | Solver      | Verdict  | Time(ms) | Agree\n");
        output.push_str("----------------|-------------|----------|----------|------\n");

        for row in rows {
            for entry in &row.entries {
                output.push_str(&format!(
                    "{:15} | {:11} | {:8} | {:>8} | {}\n",
                    truncated(&row.grid_name, 15),
                    entry.backend.name(),
                    entry.report.verdict.label(),
                    Self::format_time(entry),
                    if row.solvers_agree { "yes" } else { "NO" }
                ));
            }
        }

        output
    }

    fn format_time(entry: &BenchmarkEntry) -> String {
        if entry.report.verdict == crate::sat::Verdict::TimedOut {
            "timeout".to_string()
        } else {
            format!("{:.2}", entry.report.elapsed_ms)
        }
    }
}

fn truncated(text: &str, width: usize) -> &str {
    &text[..width.min(text.len())]
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Magenta => 35,
            Color::Cyan => 36,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Settings, SolverBackend};
    use crate::grid::Grid;
    use crate::puzzle::PuzzleProblem;
    use crate::sat::SolveReport;

    fn outcome() -> PuzzleOutcome {
        let grid = Grid::from_rows(vec![vec![1, 0]]).unwrap();
        PuzzleProblem::with_grid(Settings::default(), grid)
            .solve()
            .unwrap()
    }

    #[test]
    fn test_format_outcome() {
        let text = PuzzleFormatter::format_outcome(&outcome());
        assert!(text.contains("Solver: dpll"));
        assert!(text.contains("sat in"));
        assert!(text.contains("1 T"));
    }

    #[test]
    fn test_benchmark_table_shows_timeout_not_sentinel() {
        let row = BenchmarkRow {
            grid_name: "input_1.txt".to_string(),
            entries: vec![BenchmarkEntry {
                backend: SolverBackend::Dpll,
                report: SolveReport::timed_out(),
            }],
            solvers_agree: true,
            output_file: None,
        };
        let table = PuzzleFormatter::format_benchmark_table(&[row]);
        assert!(table.contains("timeout"));
        assert!(!table.contains("-1.00"));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        // Should either be colored or plain text
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
