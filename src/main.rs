//! Main CLI application for the gem hunter SAT solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gem_hunter::{
    benchmark::BenchmarkRunner,
    config::{CliOverrides, Settings, SolverBackend},
    grid::{create_example_grids, load_grid_from_file},
    puzzle::PuzzleProblem,
    sat::CnfBuilder,
    utils::{ColorOutput, PuzzleFormatter},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gem_hunter")]
#[command(about = "Gem Hunter SAT Solver")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a gem hunter puzzle
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Grid file (overrides config)
        #[arg(short, long)]
        grid: Option<PathBuf>,

        /// Solver backend (overrides config)
        #[arg(short, long, value_enum)]
        solver: Option<SolverBackend>,

        /// Solve timeout in milliseconds (overrides config)
        #[arg(short, long)]
        timeout_ms: Option<u64>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Benchmark every solver backend over a directory of grids
    Bench {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Directory holding input_*.txt grid files
        #[arg(short, long, default_value = "input/grids")]
        grids: PathBuf,

        /// Solve timeout in milliseconds (overrides config)
        #[arg(short, long)]
        timeout_ms: Option<u64>,
    },

    /// Show the CNF encoding of a grid
    Encode {
        /// Grid file
        #[arg(short, long)]
        grid: PathBuf,

        /// Print every clause, not just statistics
        #[arg(long)]
        clauses: bool,
    },

    /// Create example configuration and input files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            grid,
            solver,
            timeout_ms,
            output,
            verbose,
        } => solve_command(config, grid, solver, timeout_ms, output, verbose),
        Commands::Bench {
            config,
            grids,
            timeout_ms,
        } => bench_command(config, grids, timeout_ms),
        Commands::Encode { grid, clauses } => encode_command(grid, clauses),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

/// Load settings from the config file, falling back to defaults when it is
/// missing
fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn solve_command(
    config_path: PathBuf,
    grid_file: Option<PathBuf>,
    backend: Option<SolverBackend>,
    timeout_ms: Option<u64>,
    output_dir: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("Starting Gem Hunter Solver"));

    let mut settings = load_settings(&config_path)?;
    let cli_overrides = CliOverrides {
        grid_file,
        backend,
        timeout_ms,
        output_dir,
    };
    settings.merge_with_cli(&cli_overrides);

    if verbose {
        println!("Configuration:");
        println!("  Grid file: {}", settings.input.grid_file.display());
        println!("  Backend: {}", settings.solver.backend);
        println!("  Timeout: {} ms", settings.solver.timeout_ms);
        println!(
            "  Output dir: {}",
            settings.output.output_directory.display()
        );
        println!();
    }

    settings
        .validate()
        .context("Configuration validation failed")?;

    let write_output = settings.output.write_output;
    let problem = PuzzleProblem::new(settings).context("Failed to load puzzle")?;

    if verbose {
        println!("{}", problem.statistics());
    }

    let outcome = problem.solve().context("Failed to solve puzzle")?;
    println!("{}", PuzzleFormatter::format_outcome(&outcome));

    match &outcome.solution {
        Some(solution) => {
            if write_output {
                let path = problem
                    .save_solution(solution)
                    .context("Failed to save solution")?;
                println!(
                    "{}",
                    ColorOutput::success(&format!("Solution saved to {}", path.display()))
                );
            }
        }
        None => {
            println!(
                "{}",
                ColorOutput::warning(&format!(
                    "No solution: {}",
                    outcome.report.verdict.label()
                ))
            );
        }
    }

    Ok(())
}

fn bench_command(config_path: PathBuf, grids_dir: PathBuf, timeout_ms: Option<u64>) -> Result<()> {
    println!("{}", ColorOutput::info("Benchmarking solver backends"));

    let mut settings = load_settings(&config_path)?;
    if let Some(timeout_ms) = timeout_ms {
        settings.solver.timeout_ms = timeout_ms;
    }

    let grids = BenchmarkRunner::discover_grids(&grids_dir)?;
    if grids.is_empty() {
        anyhow::bail!("No input_*.txt grid files found in {}", grids_dir.display());
    }
    println!("Found {} grid file(s) in {}", grids.len(), grids_dir.display());

    let rows = BenchmarkRunner::new(settings).run(&grids)?;
    println!("\n{}", PuzzleFormatter::format_benchmark_table(&rows));

    if rows.iter().all(|row| row.solvers_agree) {
        println!("{}", ColorOutput::success("All solvers agree"));
    } else {
        println!("{}", ColorOutput::error("Solver disagreement detected"));
    }

    Ok(())
}

fn encode_command(grid_file: PathBuf, show_clauses: bool) -> Result<()> {
    let grid = load_grid_from_file(&grid_file)
        .with_context(|| format!("Failed to load grid from {}", grid_file.display()))?;

    println!("Grid ({}x{}):", grid.rows(), grid.cols());
    println!("{}", grid);

    let builder = CnfBuilder::new(&grid);
    let cnf = builder.build();
    println!("{}", builder.statistics(&cnf));

    if show_clauses {
        println!("Clauses:");
        for clause in cnf.clauses() {
            println!("  {}", clause);
        }
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/grids");
    let output_dir = directory.join("output");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_grids(&input_dir).context("Failed to create example grids")?;
    println!("Created example grids in: {}", input_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your puzzle grids to {}", input_dir.display());
    println!("3. Run: cargo run -- solve --config config/default.yaml");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "gem_hunter",
            "solve",
            "--config",
            "test.yaml",
            "--solver",
            "oracle",
            "--timeout-ms",
            "500",
        ]);

        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_rejects_unknown_backend() {
        let cli = Cli::try_parse_from(["gem_hunter", "solve", "--solver", "magic"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("input/grids/input_1.txt").exists());
    }
}
