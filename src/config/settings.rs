//! Configuration settings for the gem hunter solver

use crate::sat::SolverLimits;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub solver: SolverConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub backend: SolverBackend,
    pub timeout_ms: u64,
    pub max_depth: usize,
    pub max_bruteforce_cells: usize,
}

/// The closed set of solver backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SolverBackend {
    Dpll,
    BruteForce,
    Oracle,
}

impl SolverBackend {
    /// All backends, in benchmark reporting order
    pub const ALL: [SolverBackend; 3] = [
        SolverBackend::Oracle,
        SolverBackend::Dpll,
        SolverBackend::BruteForce,
    ];

    /// Human-readable backend name
    pub fn name(&self) -> &'static str {
        match self {
            SolverBackend::Dpll => "dpll",
            SolverBackend::BruteForce => "brute_force",
            SolverBackend::Oracle => "oracle",
        }
    }
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub grid_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub output_directory: PathBuf,
    pub write_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            solver: SolverConfig {
                backend: SolverBackend::Dpll,
                timeout_ms: 2000,
                max_depth: crate::sat::dpll::DEFAULT_MAX_DEPTH,
                max_bruteforce_cells: crate::sat::brute_force::DEFAULT_MAX_CELLS,
            },
            input: InputConfig {
                grid_file: PathBuf::from("input/grids/input_1.txt"),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                output_directory: PathBuf::from("output"),
                write_output: true,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.solver.timeout_ms == 0 {
            anyhow::bail!("Solver timeout must be positive");
        }

        if self.solver.max_depth == 0 {
            anyhow::bail!("DPLL depth bound must be positive");
        }

        if self.solver.max_bruteforce_cells == 0 {
            anyhow::bail!("Brute-force cell bound must be positive");
        }

        if !self.input.grid_file.exists() {
            anyhow::bail!(
                "Grid file does not exist: {}",
                self.input.grid_file.display()
            );
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref grid_file) = cli_overrides.grid_file {
            self.input.grid_file = grid_file.clone();
        }
        if let Some(backend) = cli_overrides.backend {
            self.solver.backend = backend;
        }
        if let Some(timeout_ms) = cli_overrides.timeout_ms {
            self.solver.timeout_ms = timeout_ms;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
    }

    /// Resource bounds for solver construction
    pub fn limits(&self) -> SolverLimits {
        SolverLimits {
            max_depth: self.solver.max_depth,
            max_bruteforce_cells: self.solver.max_bruteforce_cells,
        }
    }

    /// The per-solve wall-clock deadline
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.solver.timeout_ms)
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub grid_file: Option<PathBuf>,
    pub backend: Option<SolverBackend>,
    pub timeout_ms: Option<u64>,
    pub output_dir: Option<PathBuf>,
}
