//! File I/O for gem hunter grids
//!
//! Input format: one row per line, cells separated by commas. `_` (or `0`)
//! marks an unknown cell, `1`..`8` a clue. Output files use the same layout
//! with `T`/`G`/`_` marks for solved cells.

use super::Grid;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load a grid from a text file
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read grid file: {}", path.as_ref().display()))?;

    parse_grid_from_string(&content)
        .with_context(|| format!("Failed to parse grid from file: {}", path.as_ref().display()))
}

/// Parse a grid from its string representation
pub fn parse_grid_from_string(content: &str) -> Result<Grid> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Grid file is empty or contains no valid rows");
    }

    let mut rows = Vec::with_capacity(lines.len());
    for (row_idx, line) in lines.iter().enumerate() {
        let mut row = Vec::new();
        for (col_idx, token) in line.split(',').enumerate() {
            let token = token.trim();
            let value = match token {
                "_" | "0" => 0,
                _ => match token.parse::<u8>() {
                    Ok(clue @ 1..=8) => clue,
                    _ => anyhow::bail!(
                        "Invalid cell '{}' at ({}, {}). Expected '_' or a clue in 1..=8",
                        token,
                        row_idx,
                        col_idx
                    ),
                },
            };
            row.push(value);
        }
        rows.push(row);
    }

    Grid::from_rows(rows).map_err(Into::into)
}

/// Write rows of cell marks (e.g. `T`, `G`, `_`, clue digits) to a file in
/// the comma-separated grid layout
pub fn save_marks_to_file<P: AsRef<Path>>(marks: &[Vec<String>], path: P) -> Result<()> {
    let mut content = String::new();
    for row in marks {
        content.push_str(&row.join(", "));
        content.push('\n');
    }

    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write output file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Derive an output file name from an input path: `input_<name>.txt` becomes
/// `output_<name>.txt`; other stems get an `output_` prefix.
pub fn output_name_for_input<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("grid");
    let suffix = stem.strip_prefix("input_").unwrap_or(stem);
    let extension = input
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("txt");
    input.with_file_name(format!("output_{}.{}", suffix, extension))
}

/// Create example grid files for testing and setup
pub fn create_example_grids<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    // One clue, one neighbor: the neighbor must be a trap.
    std::fs::write(dir.join("input_1.txt"), "1, _\n").context("Failed to write input_1.txt")?;

    // Center clue with several valid assignments.
    std::fs::write(dir.join("input_2.txt"), "_, _, _\n_, 2, _\n_, _, _\n")
        .context("Failed to write input_2.txt")?;

    // Mixed clues with an unconstrained far corner.
    std::fs::write(
        dir.join("input_3.txt"),
        "3, _, _, _\n_, _, 1, _\n_, 1, _, _\n_, _, _, _\n",
    )
    .context("Failed to write input_3.txt")?;

    // Structurally unsatisfiable: the clue exceeds its neighbor count.
    std::fs::write(dir.join("input_4.txt"), "2, _\n").context("Failed to write input_4.txt")?;

    Ok(())
}
