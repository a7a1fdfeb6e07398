//! Gem hunter grid model and file I/O

pub mod grid;
pub mod io;

pub use grid::{Grid, GridError, MAX_CLUE, NEIGHBOR_OFFSETS, UNKNOWN};
pub use io::{create_example_grids, load_grid_from_file, output_name_for_input, save_marks_to_file};
