//! Command-line interface for packsmith.
//!
//! This module contains the CLI components:
//! - `args`: Argument parsing and verbosity mapping
//! - `runner`: The generation workflow runner

pub mod args;
pub mod runner;

pub use args::{get_args, get_log_level_from_verbose, Args};
pub use runner::Runner;

use crate::error::Result;

/// Runs one generation with the given arguments.
pub fn run(args: Args) -> Result<()> {
    Runner::new(args).run()
}
